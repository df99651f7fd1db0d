//! Full configuration validation.
//!
//! Collects every problem into a single `ConfigError` so a user fixing a
//! config file sees all of them at once.

mod helpers;


use crate::colors;
use crate::schema::PaxoConfig;
use paxo_common::ConfigError;

use helpers::validate_range;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &PaxoConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_script(&mut errors, config);
    validate_dispatch(&mut errors, config);
    validate_display(&mut errors, config);
    validate_colors(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_script(errors: &mut Vec<String>, config: &PaxoConfig) {
    let entry = config.script.entry_point.trim();
    if entry.is_empty() {
        errors.push("script.entry_point must not be empty".into());
    } else if !is_lua_identifier(entry) {
        errors.push(format!(
            "script.entry_point = {entry:?} is not a valid Lua identifier"
        ));
    }
}

fn validate_dispatch(errors: &mut Vec<String>, config: &PaxoConfig) {
    validate_range(
        errors,
        "dispatch.frame_rate",
        config.dispatch.frame_rate,
        1,
        240,
    );
}

fn validate_display(errors: &mut Vec<String>, config: &PaxoConfig) {
    validate_range(errors, "display.width", config.display.width, 1, u16::MAX);
    validate_range(errors, "display.height", config.display.height, 1, u16::MAX);
}

fn validate_colors(errors: &mut Vec<String>, config: &PaxoConfig) {
    for (name, value) in config.colors.overrides() {
        if let Err(e) = colors::parse_color(value) {
            errors.push(format!("colors override for {name}: {e}"));
        }
    }
}

fn is_lua_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
