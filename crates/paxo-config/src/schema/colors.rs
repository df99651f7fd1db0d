//! Overrides for the color constants published to scripts.

use serde::{Deserialize, Serialize};

/// Optional per-constant overrides. Each value is a color string
/// (`#RRGGBB` or `rgba(...)`); unset entries keep the built-in palette.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub light: Option<String>,
    pub black: Option<String>,
    pub primary: Option<String>,
    pub success: Option<String>,
    pub warning: Option<String>,
    pub blue: Option<String>,
}

impl ColorConfig {
    /// Overrides paired with the script constant they replace.
    pub fn overrides(&self) -> Vec<(&'static str, &str)> {
        [
            ("COLOR_LIGHT", &self.light),
            ("COLOR_BLACK", &self.black),
            ("COLOR_PRIMARY", &self.primary),
            ("COLOR_SUCCESS", &self.success),
            ("COLOR_WARNING", &self.warning),
            ("COLOR_BLUE", &self.blue),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
        .collect()
    }
}
