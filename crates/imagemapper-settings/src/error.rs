//! Configuration failures.
//!
//! File errors carry the path they happened on; parse errors keep the
//! underlying serde message so the offending line is reported.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot write config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot create config directory {}: {source}", path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A value outside its allowed range, named by its dotted key.
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    #[error("Malformed JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Cannot encode config as TOML: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SettingsError {
    pub(crate) fn invalid(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Where the config lives, rather than what it holds.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unsupported config extension '{0}', expected .toml or .json")]
    UnsupportedFormat(String),

    #[error("No config directory on {0}")]
    NoConfigDirectory(String),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_errors_name_the_path() {
        let err = SettingsError::Read {
            path: PathBuf::from("/etc/imagemapper/config.toml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            err.to_string(),
            "Cannot read config /etc/imagemapper/config.toml: denied"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_invalid_setting_names_the_key() {
        let err = SettingsError::invalid("export.ellipse_segments", "must be at least 3");
        assert_eq!(
            err.to_string(),
            "Invalid setting 'export.ellipse_segments': must be at least 3"
        );
    }

    #[test]
    fn test_malformed_toml_converts() {
        let parse: Result<toml::Value, _> = toml::from_str("[designer\ncanvas_width = 1");
        let err: SettingsError = parse.unwrap_err().into();
        assert!(matches!(err, SettingsError::Toml(_)));
        assert!(err.to_string().starts_with("Malformed TOML config"));
    }

    #[test]
    fn test_format_error_is_transparent() {
        let err: SettingsError = ConfigError::UnsupportedFormat("yaml".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Unsupported config extension 'yaml', expected .toml or .json"
        );
    }
}
