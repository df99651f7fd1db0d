use std::fmt;

use paxo_common::{Color, Rect};

use crate::input::TouchState;
use crate::kind::WidgetKind;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WidgetError {
    #[error("{kind} widgets do not support {operation}")]
    Unsupported {
        kind: WidgetKind,
        operation: &'static str,
    },
}

/// State every widget kind carries.
#[derive(Debug, Clone)]
pub struct WidgetBase {
    pub rect: Rect,
    pub background: Color,
    pub background_enabled: bool,
    pub visible: bool,
    pub touch: TouchState,
    dirty: bool,
}

impl WidgetBase {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            background: Color::WHITE,
            background_enabled: false,
            visible: true,
            touch: TouchState::default(),
            dirty: true,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

/// What the script bridge can do with a widget.
///
/// Implementors provide the three accessors; everything else has a default
/// that works on [`WidgetBase`]. Kinds that hold text override the text
/// methods.
pub trait Widget: fmt::Debug {
    fn kind(&self) -> WidgetKind;
    fn base(&self) -> &WidgetBase;
    fn base_mut(&mut self) -> &mut WidgetBase;

    fn rect(&self) -> Rect {
        self.base().rect
    }

    fn x(&self) -> u16 {
        self.base().rect.x
    }

    fn y(&self) -> u16 {
        self.base().rect.y
    }

    fn width(&self) -> u16 {
        self.base().rect.width
    }

    fn height(&self) -> u16 {
        self.base().rect.height
    }

    fn set_x(&mut self, x: u16) {
        let base = self.base_mut();
        base.rect.x = x;
        base.mark_dirty();
    }

    fn set_y(&mut self, y: u16) {
        let base = self.base_mut();
        base.rect.y = y;
        base.mark_dirty();
    }

    fn set_width(&mut self, width: u16) {
        let base = self.base_mut();
        base.rect.width = width;
        base.mark_dirty();
    }

    fn set_height(&mut self, height: u16) {
        let base = self.base_mut();
        base.rect.height = height;
        base.mark_dirty();
    }

    /// Background color, if background rendering is enabled.
    fn background(&self) -> Option<Color> {
        let base = self.base();
        base.background_enabled.then_some(base.background)
    }

    /// Set the background color. A widget whose background was off starts
    /// drawing it.
    fn set_background_color(&mut self, color: Color) {
        let base = self.base_mut();
        base.background = color;
        base.background_enabled = true;
        base.mark_dirty();
    }

    fn text(&self) -> Option<&str> {
        None
    }

    fn set_text(&mut self, _text: &str) -> Result<(), WidgetError> {
        Err(WidgetError::Unsupported {
            kind: self.kind(),
            operation: "setText",
        })
    }

    fn is_visible(&self) -> bool {
        self.base().visible
    }

    fn set_visible(&mut self, visible: bool) {
        let base = self.base_mut();
        base.visible = visible;
        base.mark_dirty();
    }

    /// Feed the host's touch state. Hidden widgets never register touches.
    fn set_touched(&mut self, touched: bool) {
        let base = self.base_mut();
        let touched = touched && base.visible;
        base.touch.set(touched);
    }

    fn is_touched(&self) -> bool {
        self.base().touch.is_touched()
    }

    fn is_released(&self) -> bool {
        self.base().touch.is_released()
    }

    /// Called once per frame after events have been dispatched. Returns
    /// whether the widget needed a redraw.
    fn end_frame(&mut self) -> bool {
        let base = self.base_mut();
        base.touch.end_frame();
        std::mem::replace(&mut base.dirty, false)
    }
}
