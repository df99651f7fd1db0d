//! Display geometry configuration.

use serde::{Deserialize, Serialize};

/// Physical screen size. `Window` widgets created with a zero size fill it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: u16,
    pub height: u16,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 480,
        }
    }
}
