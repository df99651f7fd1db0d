//! Configuration schema types.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod colors;
mod dispatch;
mod display;
mod script;
mod system;

pub use colors::*;
pub use dispatch::*;
pub use display::*;
pub use script::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Root configuration for a paxo script host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaxoConfig {
    pub script: ScriptConfig,
    pub dispatch: DispatchConfig,
    pub display: DisplayConfig,
    pub colors: ColorConfig,
    pub logging: LoggingConfig,
}
