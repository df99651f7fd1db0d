//! Event dispatch configuration types.

use serde::{Deserialize, Serialize};

/// Whether the host keeps polling events after the entry point returns.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// Run the frame loop until `max_frames` or a quit request.
    #[default]
    Continuous,
    /// Run exactly one update and dispatch cycle after the entry point.
    SingleShot,
}

/// When a registered event fires relative to its predicate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TriggerMode {
    /// Fire on every cycle the predicate holds.
    #[default]
    Level,
    /// Fire only on the cycle the predicate turns true.
    Edge,
}

/// Dispatch loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub mode: DispatchMode,
    pub trigger: TriggerMode,
    /// Target frames per second (valid range: 1-240).
    pub frame_rate: u32,
    /// Stop after this many frames. `0` runs until the host quits.
    pub max_frames: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            mode: DispatchMode::Continuous,
            trigger: TriggerMode::Level,
            frame_rate: 50,
            max_frames: 0,
        }
    }
}

impl DispatchConfig {
    /// Time budget of one frame.
    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / f64::from(self.frame_rate.max(1)))
    }
}
