use serde::{Deserialize, Serialize};
use std::fmt;

/// Pixel rectangle in the widget's native 16-bit coordinate space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, px: u16, py: u16) -> bool {
        let (px, py) = (u32::from(px), u32::from(py));
        let (x, y) = (u32::from(self.x), u32::from(self.y));
        px >= x && py >= y && px < x + u32::from(self.width) && py < y + u32::from(self.height)
    }
}

/// Opaque script-side reference to a registered widget.
///
/// Handles are dense and 0-based within one session; they index the
/// session's widget registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WidgetHandle(pub u32);

impl WidgetHandle {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for WidgetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
