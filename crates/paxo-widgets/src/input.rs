//! Per-widget touch history.

/// Touch state across two frames: what the host reports now, and what it
/// reported when the previous frame ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchState {
    current: bool,
    previous: bool,
}

impl TouchState {
    pub fn set(&mut self, touched: bool) {
        self.current = touched;
    }

    /// Close the frame: the current state becomes the previous one.
    pub fn end_frame(&mut self) {
        self.previous = self.current;
    }

    pub fn is_touched(&self) -> bool {
        self.current
    }

    /// The touch ended during this frame.
    pub fn is_released(&self) -> bool {
        self.previous && !self.current
    }
}
