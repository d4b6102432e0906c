//! ImageMapper Settings Crate
//!
//! Handles application configuration and settings persistence.

pub mod config;
pub mod error;

pub use config::{Config, DesignerSettings, ExportSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
