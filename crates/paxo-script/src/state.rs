//! Per-session bridge context.
//!
//! One [`BridgeState`] exists per session, shared between the native
//! functions through `Rc<RefCell<_>>`. Every operation here is a single,
//! short mutation; none of them calls back into Lua.

use std::collections::VecDeque;
use std::fmt;

use paxo_common::{Color, Rect, SessionId, WidgetHandle};
use paxo_config::{DisplayConfig, TriggerMode};
use paxo_widgets::{clamp_coord, WidgetKind};
use tracing::{info, warn};

use crate::error::BridgeError;
use crate::events::{EventRecord, EventTable, Predicate};
use crate::registry::Registry;

/// Oldest entries are dropped past this many diagnostics.
pub const MAX_DIAGNOSTICS: usize = 256;
/// Oldest lines are dropped past this many lines of script output.
pub const MAX_OUTPUT_LINES: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryField {
    X,
    Y,
    Width,
    Height,
}

impl GeometryField {
    pub const ALL: [GeometryField; 4] = [
        GeometryField::X,
        GeometryField::Y,
        GeometryField::Width,
        GeometryField::Height,
    ];

    pub fn setter(self) -> &'static str {
        match self {
            GeometryField::X => "setX",
            GeometryField::Y => "setY",
            GeometryField::Width => "setWidth",
            GeometryField::Height => "setHeight",
        }
    }

    pub fn getter(self) -> &'static str {
        match self {
            GeometryField::X => "getX",
            GeometryField::Y => "getY",
            GeometryField::Width => "getWidth",
            GeometryField::Height => "getHeight",
        }
    }
}

/// One reported failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Script function or session phase that failed (`setText`, `run`, ...).
    pub operation: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.operation, self.message)
    }
}

#[derive(Debug)]
pub struct BridgeState {
    pub(crate) session: SessionId,
    pub(crate) display: DisplayConfig,
    pub(crate) registry: Registry,
    pub(crate) events: EventTable,
    diagnostics: VecDeque<Diagnostic>,
    output: VecDeque<String>,
}

impl BridgeState {
    pub fn new(session: SessionId, display: DisplayConfig, trigger: TriggerMode) -> Self {
        Self {
            session,
            display,
            registry: Registry::new(),
            events: EventTable::new(trigger),
            diagnostics: VecDeque::new(),
            output: VecDeque::new(),
        }
    }

    /// Create a widget from its script tag.
    ///
    /// A `Window` given a zero width or height takes that dimension from
    /// the display.
    pub fn create_widget(
        &mut self,
        tag: &str,
        mut rect: Rect,
        parent: Option<WidgetHandle>,
    ) -> Result<WidgetHandle, BridgeError> {
        let kind = WidgetKind::from_tag(tag)
            .ok_or_else(|| BridgeError::UnknownWidgetKind(tag.to_string()))?;
        if kind == WidgetKind::Window {
            if rect.width == 0 {
                rect.width = self.display.width;
            }
            if rect.height == 0 {
                rect.height = self.display.height;
            }
        }
        self.registry.create(kind, rect, parent)
    }

    pub fn geometry(&self, handle: WidgetHandle, field: GeometryField) -> Result<u16, BridgeError> {
        let widget = self.registry.resolve(handle)?;
        Ok(match field {
            GeometryField::X => widget.x(),
            GeometryField::Y => widget.y(),
            GeometryField::Width => widget.width(),
            GeometryField::Height => widget.height(),
        })
    }

    /// Set one geometry field. Out-of-range values are clamped to the
    /// widget coordinate range.
    pub fn set_geometry(
        &mut self,
        handle: WidgetHandle,
        field: GeometryField,
        value: i64,
    ) -> Result<(), BridgeError> {
        let widget = self.registry.resolve_mut(handle)?;
        let value = clamp_coord(value);
        match field {
            GeometryField::X => widget.set_x(value),
            GeometryField::Y => widget.set_y(value),
            GeometryField::Width => widget.set_width(value),
            GeometryField::Height => widget.set_height(value),
        }
        Ok(())
    }

    pub fn set_color(&mut self, handle: WidgetHandle, color: Color) -> Result<(), BridgeError> {
        self.registry
            .resolve_mut(handle)?
            .set_background_color(color);
        Ok(())
    }

    pub fn set_text(&mut self, handle: WidgetHandle, text: &str) -> Result<(), BridgeError> {
        self.registry.resolve_mut(handle)?.set_text(text)?;
        Ok(())
    }

    /// Record an event for later dispatch. The widget must exist; the
    /// callback is looked up only when the event fires.
    pub fn register_event(
        &mut self,
        handle: WidgetHandle,
        predicate: Predicate,
        callback: &str,
    ) -> Result<usize, BridgeError> {
        self.registry.resolve(handle)?;
        Ok(self.events.register(EventRecord {
            handle,
            predicate,
            callback: callback.to_string(),
        }))
    }

    /// Log a failure and keep it in the diagnostics log.
    pub fn report(&mut self, operation: &str, error: &dyn fmt::Display) {
        warn!(
            session = %self.session,
            operation,
            error = %error,
            "script call failed"
        );
        if self.diagnostics.len() == MAX_DIAGNOSTICS {
            self.diagnostics.pop_front();
        }
        self.diagnostics.push_back(Diagnostic {
            operation: operation.to_string(),
            message: error.to_string(),
        });
    }

    /// A line written by the script's `print`.
    pub fn record_output(&mut self, line: String) {
        info!(target: "paxo::script", session = %self.session, "{line}");
        if self.output.len() == MAX_OUTPUT_LINES {
            self.output.pop_front();
        }
        self.output.push_back(line);
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn events(&self) -> &EventTable {
        &self.events
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.iter().cloned().collect()
    }

    pub fn output(&self) -> Vec<String> {
        self.output.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paxo_widgets::WidgetError;

    fn state() -> BridgeState {
        BridgeState::new(
            SessionId::new(),
            DisplayConfig::default(),
            TriggerMode::Level,
        )
    }

    #[test]
    fn unknown_kind_issues_no_handle() {
        let mut s = state();
        let err = s
            .create_widget("Button", Rect::default(), None)
            .unwrap_err();
        assert_eq!(err, BridgeError::UnknownWidgetKind("Button".into()));
        assert!(s.registry().is_empty());
        let h = s.create_widget("Box", Rect::default(), None).unwrap();
        assert_eq!(h, WidgetHandle(0));
    }

    #[test]
    fn zero_sized_window_takes_display_size() {
        let mut s = state();
        let h = s.create_widget("Window", Rect::default(), None).unwrap();
        assert_eq!(s.geometry(h, GeometryField::Width).unwrap(), 320);
        assert_eq!(s.geometry(h, GeometryField::Height).unwrap(), 480);
    }

    #[test]
    fn zero_sized_panel_stays_zero() {
        let mut s = state();
        let h = s.create_widget("Box", Rect::default(), None).unwrap();
        assert_eq!(s.geometry(h, GeometryField::Width).unwrap(), 0);
    }

    #[test]
    fn geometry_round_trips_and_clamps() {
        let mut s = state();
        let h = s.create_widget("Box", Rect::default(), None).unwrap();
        for field in GeometryField::ALL {
            s.set_geometry(h, field, 42).unwrap();
            assert_eq!(s.geometry(h, field).unwrap(), 42);
        }
        s.set_geometry(h, GeometryField::X, -10).unwrap();
        assert_eq!(s.geometry(h, GeometryField::X).unwrap(), 0);
        s.set_geometry(h, GeometryField::Y, 1_000_000).unwrap();
        assert_eq!(s.geometry(h, GeometryField::Y).unwrap(), u16::MAX);
    }

    #[test]
    fn set_text_on_panel_is_a_type_mismatch() {
        let mut s = state();
        let h = s.create_widget("Box", Rect::default(), None).unwrap();
        let err = s.set_text(h, "hello").unwrap_err();
        assert_eq!(
            err,
            BridgeError::TypeMismatch(WidgetError::Unsupported {
                kind: WidgetKind::Panel,
                operation: "setText"
            })
        );
        assert_eq!(s.registry().resolve(h).unwrap().text(), None);
    }

    #[test]
    fn set_color_enables_background() {
        let mut s = state();
        let h = s.create_widget("Label", Rect::default(), None).unwrap();
        assert_eq!(s.registry().resolve(h).unwrap().background(), None);
        s.set_color(h, Color::BLACK).unwrap();
        assert_eq!(
            s.registry().resolve(h).unwrap().background(),
            Some(Color::BLACK)
        );
    }

    #[test]
    fn register_event_requires_live_widget() {
        let mut s = state();
        let err = s
            .register_event(WidgetHandle(3), Predicate::Touched, "cb")
            .unwrap_err();
        assert_eq!(err, BridgeError::InvalidHandle("3".into()));
        assert!(s.events().is_empty());
    }

    #[test]
    fn diagnostics_are_bounded() {
        let mut s = state();
        for i in 0..MAX_DIAGNOSTICS + 5 {
            s.report("setX", &BridgeError::InvalidHandle(i.to_string()));
        }
        let diagnostics = s.diagnostics();
        assert_eq!(diagnostics.len(), MAX_DIAGNOSTICS);
        assert_eq!(diagnostics[0].message, "invalid widget handle: 5");
        assert_eq!(diagnostics[0].to_string(), "setX: invalid widget handle: 5");
    }

    #[test]
    fn output_is_kept_in_order() {
        let mut s = state();
        s.record_output("one".into());
        s.record_output("two".into());
        assert_eq!(s.output(), vec!["one", "two"]);
    }
}
