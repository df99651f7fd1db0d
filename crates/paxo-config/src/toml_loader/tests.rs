//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use crate::schema::{DispatchMode, PaxoConfig, TriggerMode};
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_paxo_config.toml"));
    assert!(matches!(
        result.unwrap_err(),
        paxo_common::ConfigError::FileNotFound(_)
    ));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r##"
[dispatch]
mode = "single_shot"
frame_rate = 30

[colors]
primary = "#ff0000"
"##,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.dispatch.mode, DispatchMode::SingleShot);
    assert_eq!(config.dispatch.frame_rate, 30);
    assert_eq!(config.colors.primary.as_deref(), Some("#ff0000"));
    // Defaults preserved
    assert_eq!(config.dispatch.trigger, TriggerMode::Level);
    assert_eq!(config.script.entry_point, "run");
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, paxo_common::ConfigError::ParseError(_)));
}

#[test]
fn load_config_with_invalid_values_falls_back_to_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[dispatch]
frame_rate = 0
max_frames = 12
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.dispatch.frame_rate, 50);
    assert_eq!(config.dispatch.max_frames, 0);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("paxo").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.script.entry_point, "run");
    assert_eq!(config.display.width, 320);
}

#[test]
fn default_config_toml_is_valid() {
    use super::template::default_config_toml;

    let config: PaxoConfig = toml::from_str(&default_config_toml()).unwrap();
    assert_eq!(config.dispatch.frame_rate, 50);
    assert!(config.colors.overrides().is_empty());
}

#[test]
fn default_config_path_is_reasonable() {
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("paxo"));
        assert!(path_str.ends_with("config.toml"));
    }
}
