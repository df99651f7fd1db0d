use paxo_common::Rect;

use crate::kind::WidgetKind;
use crate::widget::{Widget, WidgetBase, WidgetError};

#[derive(Debug, Clone)]
pub struct Label {
    base: WidgetBase,
    text: String,
}

impl Label {
    pub fn new(rect: Rect) -> Self {
        Self {
            base: WidgetBase::new(rect),
            text: String::new(),
        }
    }
}

impl Widget for Label {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Label
    }

    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn text(&self) -> Option<&str> {
        Some(&self.text)
    }

    fn set_text(&mut self, text: &str) -> Result<(), WidgetError> {
        if self.text != text {
            self.text = text.to_string();
            self.base.mark_dirty();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_round_trips() {
        let mut label = Label::new(Rect::default());
        assert_eq!(label.text(), Some(""));
        label.set_text("Hi").unwrap();
        assert_eq!(label.text(), Some("Hi"));
    }

    #[test]
    fn unchanged_text_does_not_dirty() {
        let mut label = Label::new(Rect::default());
        label.set_text("Hi").unwrap();
        label.end_frame();
        label.set_text("Hi").unwrap();
        assert!(!label.end_frame());
    }
}
