//! Color constants published into every script's globals.

use paxo_common::{Color, ConfigError};
use paxo_config::{colors::parse_color, ColorConfig};

use crate::error::ScriptError;
use crate::runtime::ScriptRuntime;

const BUILTIN: [(&str, Color); 6] = [
    ("COLOR_LIGHT", Color::from_rgb(0xf8, 0xf9, 0xfa)),
    ("COLOR_BLACK", Color::from_rgb(0x00, 0x00, 0x00)),
    ("COLOR_PRIMARY", Color::from_rgb(0x0d, 0x6e, 0xfd)),
    ("COLOR_SUCCESS", Color::from_rgb(0x19, 0x87, 0x54)),
    ("COLOR_WARNING", Color::from_rgb(0xff, 0xc1, 0x07)),
    ("COLOR_BLUE", Color::from_rgb(0x00, 0x00, 0xff)),
];

/// Name to color mapping, fixed once the session boots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTable {
    entries: Vec<(&'static str, Color)>,
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ColorTable {
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN.to_vec(),
        }
    }

    /// Built-in palette with the configured overrides applied.
    pub fn from_config(config: &ColorConfig) -> Result<Self, ConfigError> {
        let mut table = Self::builtin();
        for (name, value) in config.overrides() {
            let color = parse_color(value)?;
            if let Some(entry) = table.entries.iter_mut().find(|(n, _)| *n == name) {
                entry.1 = color;
            }
        }
        Ok(table)
    }

    pub fn get(&self, name: &str) -> Option<Color> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, c)| *c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Color)> + '_ {
        self.entries.iter().copied()
    }

    /// Set each constant as a packed `0xRRGGBB` integer global. Alpha is
    /// not representable and is dropped.
    pub fn publish(&self, runtime: &ScriptRuntime) -> Result<(), ScriptError> {
        for (name, color) in self.iter() {
            runtime.set_constant(name, i64::from(color.to_packed()))?;
        }
        Ok(())
    }
}
