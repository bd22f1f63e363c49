pub mod api_client;
pub mod column_manager;
pub mod config;
pub mod data;
pub mod help_text;
pub mod logging;
pub mod search_filter;
pub mod table_display;
pub mod ui;
