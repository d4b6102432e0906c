//! Configuration and settings management for ImageMapper
//!
//! Provides configuration file handling, settings management, and validation.
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Designer defaults (canvas size, polygon closing, grid parameters)
//! - Export preferences (map name, ellipse approximation, empty attributes)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use imagemapper_core::Size;
use imagemapper_designer::{ExportOptions, GridParameters, POLYGON_CLOSE_DISTANCE};

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Directory name under the platform config directory.
const APP_DIR: &str = "imagemapper";
const CONFIG_FILE: &str = "config.toml";

/// Designer defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignerSettings {
    /// Canvas width used when no image is loaded
    pub canvas_width: i32,
    /// Canvas height used when no image is loaded
    pub canvas_height: i32,
    /// Distance in pixels within which a click closes a polygon
    pub polygon_close_distance: f64,
    /// Parameters given to new grids
    pub grid: GridParameters,
}

impl Default for DesignerSettings {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            polygon_close_distance: POLYGON_CLOSE_DISTANCE,
            grid: GridParameters::default(),
        }
    }
}

/// HTML export preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// `name` attribute of the `<map>` element
    pub map_name: String,
    /// Polygon segments written for an ellipse
    pub ellipse_segments: usize,
    /// Write attributes whose value is empty
    pub include_empty_attributes: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        let options = ExportOptions::default();
        Self {
            map_name: options.map_name,
            ellipse_segments: options.ellipse_segments,
            include_empty_attributes: options.include_empty_attributes,
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Designer defaults
    pub designer: DesignerSettings,
    /// Export preferences
    pub export: ExportSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location, `<config dir>/imagemapper/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::NoConfigDirectory(std::env::consts::OS.to_string()))?;
        Ok(dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads `path` when it exists, the defaults otherwise.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| SettingsError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, content).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.designer.canvas_width <= 0 || self.designer.canvas_height <= 0 {
            return Err(SettingsError::invalid("designer.canvas", "dimensions must be > 0"));
        }

        let close = self.designer.polygon_close_distance;
        if close.is_nan() || close <= 0.0 {
            return Err(SettingsError::invalid(
                "designer.polygon_close_distance",
                "must be > 0",
            ));
        }

        if self.export.map_name.trim().is_empty() {
            return Err(SettingsError::invalid("export.map_name", "must not be empty"));
        }

        if self.export.ellipse_segments < 3 {
            return Err(SettingsError::invalid(
                "export.ellipse_segments",
                "must be at least 3",
            ));
        }

        Ok(())
    }

    /// Canvas size for a design without an image
    pub fn canvas_size(&self) -> Size {
        Size::new(self.designer.canvas_width, self.designer.canvas_height)
    }

    /// Export preferences as designer options
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            map_name: self.export.map_name.clone(),
            ellipse_segments: self.export.ellipse_segments,
            include_empty_attributes: self.export.include_empty_attributes,
        }
    }
}
