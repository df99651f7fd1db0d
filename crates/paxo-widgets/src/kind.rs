use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of widget kinds a script can create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidgetKind {
    /// Root container, one per app screen.
    Window,
    /// Plain rectangle with a background. Scripts call it `Box`.
    Panel,
    /// Single line of text.
    Label,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 3] = [WidgetKind::Window, WidgetKind::Panel, WidgetKind::Label];

    /// Resolve the tag a script passes as the first argument of `Gui`.
    /// Tags are case-sensitive.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Window" => Some(WidgetKind::Window),
            "Box" => Some(WidgetKind::Panel),
            "Label" => Some(WidgetKind::Label),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            WidgetKind::Window => "Window",
            WidgetKind::Panel => "Box",
            WidgetKind::Label => "Label",
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
