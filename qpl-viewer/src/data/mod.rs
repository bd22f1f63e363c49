//! Data layer for the QPL table
//!
//! Records stay immutable once loaded; everything the table shows is a
//! derived view over them.

pub mod data_view;
pub mod ordered_keys;
pub mod paginator;
pub mod record;
pub mod value_format;
