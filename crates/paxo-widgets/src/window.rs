use paxo_common::Rect;

use crate::kind::WidgetKind;
use crate::widget::{Widget, WidgetBase};

/// Root container of a script app's screen.
#[derive(Debug, Clone)]
pub struct Window {
    base: WidgetBase,
}

impl Window {
    pub fn new(rect: Rect) -> Self {
        Self {
            base: WidgetBase::new(rect),
        }
    }
}

impl Widget for Window {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Window
    }

    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }
}
