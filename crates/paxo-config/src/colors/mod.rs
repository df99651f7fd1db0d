//! Color string parsing for configuration overrides.
//!
//! Supports `#RGB`, `#RRGGBB`, `#RRGGBBAA`, and `rgba(r,g,b,a)`. Scripts
//! only ever see the packed `0xRRGGBB` form, so alpha is accepted here but
//! dropped when the constant is published.

mod parse;


use paxo_common::types::Color;
use paxo_common::ConfigError;

use parse::{parse_hex, parse_rgba};

/// Parse a color string into a [`Color`].
pub fn parse_color(s: &str) -> Result<Color, ConfigError> {
    let s = s.trim();

    if s.starts_with('#') {
        if let Some(color) = parse_hex(s) {
            return Ok(color);
        }
        return Err(ConfigError::ParseError(format!("invalid hex color: {s}")));
    }

    if s.starts_with("rgba(") || s.starts_with("rgb(") {
        if let Some(color) = parse_rgba(s) {
            return Ok(color);
        }
        return Err(ConfigError::ParseError(format!("invalid rgba color: {s}")));
    }

    Err(ConfigError::ParseError(format!(
        "unrecognized color format: {s}"
    )))
}
