//! Paxo script host configuration.
//!
//! TOML-based, with every section defaulted so partial configs work out of
//! the box. Values are validated after parsing; an invalid file is replaced
//! by the defaults rather than aborting startup.

pub mod colors;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    ColorConfig, DispatchConfig, DispatchMode, DisplayConfig, LogLevel, LoggingConfig,
    PaxoConfig, ScriptConfig, TriggerMode,
};

use paxo_common::ConfigError;
use std::path::Path;

/// Load config from `path` if given, otherwise from the platform default
/// location (creating it on first start), then validate.
pub fn load_config(path: Option<&Path>) -> Result<PaxoConfig, ConfigError> {
    let config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };
    validation::validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_config_with_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("host.toml");
        std::fs::write(&path, "[script]\nentry_point = \"main\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.script.entry_point, "main");
    }

    #[test]
    fn load_config_with_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }
}
