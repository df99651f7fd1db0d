//! Widget capability interface used by the script bridge.
//!
//! The bridge never sees a concrete widget type; it talks to
//! [`Widget`] trait objects built once per [`WidgetKind`]. Rendering and
//! layout live outside this crate.

pub mod input;
pub mod kind;
pub mod label;
pub mod panel;
pub mod widget;
pub mod window;

pub use input::TouchState;
pub use kind::WidgetKind;
pub use label::Label;
pub use panel::Panel;
pub use widget::{Widget, WidgetBase, WidgetError};
pub use window::Window;

use paxo_common::Rect;

/// Build a boxed widget of the given kind.
pub fn build(kind: WidgetKind, rect: Rect) -> Box<dyn Widget> {
    match kind {
        WidgetKind::Window => Box::new(Window::new(rect)),
        WidgetKind::Panel => Box::new(Panel::new(rect)),
        WidgetKind::Label => Box::new(Label::new(rect)),
    }
}

/// Clamp a script-supplied coordinate into the native 16-bit range.
pub fn clamp_coord(value: i64) -> u16 {
    value.clamp(0, i64::from(u16::MAX)) as u16
}
