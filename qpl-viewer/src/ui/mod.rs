//! Terminal user interface
//!
//! Key mapping, the interactive app and table rendering.

pub mod actions;
pub mod key_mapper;
pub mod table_renderer;
pub mod tui_app;
