//! Configuration module
//!
//! Viewer settings loaded from a TOML file with environment overrides.

pub mod config;
