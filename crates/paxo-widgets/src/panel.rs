use paxo_common::{Color, Rect};

use crate::kind::WidgetKind;
use crate::widget::{Widget, WidgetBase};

/// Background color a freshly created panel is painted with.
pub const PANEL_BACKGROUND: Color = Color::from_rgb(0xf8, 0xf9, 0xfa);

/// A filled rectangle. Unlike other kinds it draws its background from the
/// start.
#[derive(Debug, Clone)]
pub struct Panel {
    base: WidgetBase,
}

impl Panel {
    pub fn new(rect: Rect) -> Self {
        let mut base = WidgetBase::new(rect);
        base.background = PANEL_BACKGROUND;
        base.background_enabled = true;
        Self { base }
    }
}

impl Widget for Panel {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Panel
    }

    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }
}
