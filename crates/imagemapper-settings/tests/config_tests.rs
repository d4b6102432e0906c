use tempfile::tempdir;

use imagemapper_designer::{Alignment, GridOrder, ScopeMode};
use imagemapper_settings::{Config, ConfigError, SettingsError};

fn customised() -> Config {
    let mut config = Config::default();
    config.designer.canvas_width = 1024;
    config.designer.polygon_close_distance = 6.5;
    config.designer.grid.scope_mode = ScopeMode::Outer;
    config.designer.grid.alignment = Alignment::AltVertical;
    config.designer.grid.spacing = 4;
    config.designer.grid.order = GridOrder::BottomRight;
    config.export.map_name = "floorplan".to_string();
    config.export.include_empty_attributes = true;
    config
}

#[test]
fn test_toml_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let config = customised();

    config.save_to_file(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("alt-vertical"));
    assert_eq!(Config::load_from_file(&path).unwrap(), config);
}

#[test]
fn test_json_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    let config = customised();

    config.save_to_file(&path).unwrap();
    assert_eq!(Config::load_from_file(&path).unwrap(), config);
}

#[test]
fn test_partial_file_takes_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[export]\nmap_name = \"nav\"\n").unwrap();

    let config = Config::load_from_file(&path).unwrap();
    assert_eq!(config.export.map_name, "nav");
    assert_eq!(config.export.ellipse_segments, 24);
    assert_eq!(config.designer, Config::default().designer);
}

#[test]
fn test_unknown_extension_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    assert!(matches!(
        Config::default().save_to_file(&path),
        Err(SettingsError::Config(ConfigError::UnsupportedFormat(_)))
    ));
}

#[test]
fn test_invalid_file_is_rejected_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[designer]\ncanvas_width = 0\n").unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::InvalidSetting { .. })
    ));
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let config = Config::load_or_default(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_missing_file_reports_its_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gone.toml");
    match Config::load_from_file(&path) {
        Err(SettingsError::Read { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected a read error, got {other:?}"),
    }
}
