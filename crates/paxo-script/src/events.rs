//! Event registrations and the per-frame dispatch cycle.
//!
//! A registration pairs a widget with a predicate and the name of a global
//! Lua function. Nothing fires at registration time: each dispatch cycle
//! walks the table in registration order, evaluates the predicates, and
//! calls the named functions whose predicate holds.

use std::cell::RefCell;

use paxo_common::WidgetHandle;
use paxo_config::TriggerMode;
use paxo_widgets::Widget;
use tracing::debug;

use crate::error::ScriptError;
use crate::registry::Registry;
use crate::state::BridgeState;

/// Which widget state a registration watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// The widget is being touched this frame.
    Touched,
    /// A touch on the widget ended this frame.
    Released,
}

impl Predicate {
    pub fn evaluate(self, widget: &dyn Widget) -> bool {
        match self {
            Predicate::Touched => widget.is_touched(),
            Predicate::Released => widget.is_released(),
        }
    }

    /// The script function that registers this predicate.
    pub fn registrar(self) -> &'static str {
        match self {
            Predicate::Touched => "onClick",
            Predicate::Released => "onRelease",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub handle: WidgetHandle,
    pub predicate: Predicate,
    pub callback: String,
}

/// Calls a script function by name. Implemented by the Lua runtime; tests
/// substitute a recorder.
pub trait CallbackInvoker {
    fn invoke(&self, callback: &str) -> Result<(), ScriptError>;
}

/// Append-only list of registrations.
///
/// In edge mode each record remembers whether its predicate held on the
/// previous cycle; the records themselves never change.
#[derive(Debug, Default)]
pub struct EventTable {
    records: Vec<EventRecord>,
    latched: Vec<bool>,
    trigger: TriggerMode,
}

impl EventTable {
    pub fn new(trigger: TriggerMode) -> Self {
        Self {
            records: Vec::new(),
            latched: Vec::new(),
            trigger,
        }
    }

    pub fn register(&mut self, record: EventRecord) -> usize {
        self.records.push(record);
        self.latched.push(false);
        self.records.len() - 1
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn trigger(&self) -> TriggerMode {
        self.trigger
    }

    /// Evaluate record `index` against the registry. Returns the callback
    /// name when the record fires this cycle.
    pub fn poll(&mut self, index: usize, registry: &Registry) -> Option<String> {
        let record = self.records.get(index)?;
        let active = registry
            .resolve(record.handle)
            .map(|widget| record.predicate.evaluate(widget))
            .unwrap_or(false);

        let fire = match self.trigger {
            TriggerMode::Level => active,
            TriggerMode::Edge => {
                let was = std::mem::replace(&mut self.latched[index], active);
                active && !was
            }
        };
        fire.then(|| record.callback.clone())
    }
}

/// Outcome of one dispatch cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub evaluated: usize,
    pub fired: usize,
    pub failed: usize,
}

/// Run one dispatch cycle.
///
/// Only records present when the cycle starts are evaluated. The state is
/// borrowed just long enough to evaluate each record and is released
/// before the callback runs, so callbacks may freely call back into the
/// bridge (including registering new events for the next cycle).
pub fn dispatch_cycle(
    state: &RefCell<BridgeState>,
    invoker: &dyn CallbackInvoker,
) -> DispatchReport {
    let count = state.borrow().events.len();
    let mut report = DispatchReport::default();

    for index in 0..count {
        let callback = {
            let mut guard = state.borrow_mut();
            let state = &mut *guard;
            state.events.poll(index, &state.registry)
        };
        report.evaluated += 1;

        let Some(callback) = callback else {
            continue;
        };
        report.fired += 1;
        debug!(callback = %callback, "dispatching event");

        if let Err(err) = invoker.invoke(&callback) {
            report.failed += 1;
            state.borrow_mut().report("dispatch", &err);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use paxo_common::Rect;
    use paxo_config::DisplayConfig;
    use std::cell::RefCell;

    /// Records every invocation; fails for names listed in `failing`.
    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<String>>,
        failing: Vec<&'static str>,
    }

    impl CallbackInvoker for Recorder {
        fn invoke(&self, callback: &str) -> Result<(), ScriptError> {
            self.calls.borrow_mut().push(callback.to_string());
            if self.failing.iter().any(|name| *name == callback) {
                Err(ScriptError::MissingFunction(callback.to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn state_with(trigger: TriggerMode) -> RefCell<BridgeState> {
        RefCell::new(BridgeState::new(
            paxo_common::SessionId::new(),
            DisplayConfig::default(),
            trigger,
        ))
    }

    fn label(state: &RefCell<BridgeState>) -> WidgetHandle {
        state
            .borrow_mut()
            .create_widget("Label", Rect::new(0, 0, 10, 10), None)
            .unwrap()
    }

    fn touch(state: &RefCell<BridgeState>, handle: WidgetHandle, touched: bool) {
        state
            .borrow_mut()
            .registry_mut()
            .resolve_mut(handle)
            .unwrap()
            .set_touched(touched);
    }

    #[test]
    fn untouched_widget_fires_nothing() {
        let state = state_with(TriggerMode::Level);
        let h = label(&state);
        state
            .borrow_mut()
            .register_event(h, Predicate::Touched, "tap")
            .unwrap();

        let recorder = Recorder::default();
        let report = dispatch_cycle(&state, &recorder);
        assert_eq!(
            report,
            DispatchReport {
                evaluated: 1,
                fired: 0,
                failed: 0
            }
        );
        assert!(recorder.calls.borrow().is_empty());
    }

    #[test]
    fn level_trigger_fires_once_per_cycle_while_touched() {
        let state = state_with(TriggerMode::Level);
        let h = label(&state);
        state
            .borrow_mut()
            .register_event(h, Predicate::Touched, "tap")
            .unwrap();
        touch(&state, h, true);

        let recorder = Recorder::default();
        dispatch_cycle(&state, &recorder);
        dispatch_cycle(&state, &recorder);
        assert_eq!(*recorder.calls.borrow(), vec!["tap", "tap"]);
    }

    #[test]
    fn edge_trigger_fires_on_transition_only() {
        let state = state_with(TriggerMode::Edge);
        let h = label(&state);
        state
            .borrow_mut()
            .register_event(h, Predicate::Touched, "tap")
            .unwrap();

        let recorder = Recorder::default();
        touch(&state, h, true);
        dispatch_cycle(&state, &recorder);
        dispatch_cycle(&state, &recorder);
        assert_eq!(recorder.calls.borrow().len(), 1);

        touch(&state, h, false);
        dispatch_cycle(&state, &recorder);
        touch(&state, h, true);
        dispatch_cycle(&state, &recorder);
        assert_eq!(recorder.calls.borrow().len(), 2);
    }

    #[test]
    fn callbacks_run_in_registration_order() {
        let state = state_with(TriggerMode::Level);
        let a = label(&state);
        let b = label(&state);
        {
            let mut s = state.borrow_mut();
            s.register_event(b, Predicate::Touched, "second").unwrap();
            s.register_event(a, Predicate::Touched, "first").unwrap();
            s.register_event(b, Predicate::Touched, "third").unwrap();
        }
        touch(&state, a, true);
        touch(&state, b, true);

        let recorder = Recorder::default();
        dispatch_cycle(&state, &recorder);
        assert_eq!(*recorder.calls.borrow(), vec!["second", "first", "third"]);
    }

    #[test]
    fn failing_callback_does_not_stop_the_cycle() {
        let state = state_with(TriggerMode::Level);
        let h = label(&state);
        {
            let mut s = state.borrow_mut();
            s.register_event(h, Predicate::Touched, "missing").unwrap();
            s.register_event(h, Predicate::Touched, "present").unwrap();
        }
        touch(&state, h, true);

        let recorder = Recorder {
            failing: vec!["missing"],
            ..Default::default()
        };
        let report = dispatch_cycle(&state, &recorder);
        assert_eq!(report.fired, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(*recorder.calls.borrow(), vec!["missing", "present"]);

        let state = state.borrow();
        let diagnostics = state.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].operation, "dispatch");
        assert!(diagnostics[0].message.contains("missing"));
    }

    #[test]
    fn released_predicate_fires_after_touch_ends() {
        let state = state_with(TriggerMode::Level);
        let h = label(&state);
        state
            .borrow_mut()
            .register_event(h, Predicate::Released, "up")
            .unwrap();
        let recorder = Recorder::default();

        touch(&state, h, true);
        dispatch_cycle(&state, &recorder);
        state.borrow_mut().registry_mut().end_frame();
        assert!(recorder.calls.borrow().is_empty());

        touch(&state, h, false);
        dispatch_cycle(&state, &recorder);
        assert_eq!(*recorder.calls.borrow(), vec!["up"]);
    }

    #[test]
    fn predicate_registrar_names() {
        assert_eq!(Predicate::Touched.registrar(), "onClick");
        assert_eq!(Predicate::Released.registrar(), "onRelease");
    }
}
