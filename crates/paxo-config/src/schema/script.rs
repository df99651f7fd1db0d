//! Script runtime configuration.

use serde::{Deserialize, Serialize};

/// Script runtime settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    /// Global function called once after the top-level chunk has run.
    pub entry_point: String,
    /// Upper bound on Lua heap usage in bytes. `0` disables the limit.
    pub memory_limit: usize,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            entry_point: "run".into(),
            memory_limit: 0,
        }
    }
}
