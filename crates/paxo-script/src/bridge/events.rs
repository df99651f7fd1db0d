use std::cell::RefCell;
use std::rc::Rc;

use mlua::{Lua, Value, Variadic};

use super::{finish, handle_arg};
use crate::events::Predicate;
use crate::marshal;
use crate::state::BridgeState;

pub(super) fn install(lua: &Lua, state: &Rc<RefCell<BridgeState>>) -> mlua::Result<()> {
    let globals = lua.globals();

    for predicate in [Predicate::Touched, Predicate::Released] {
        let event_state = Rc::clone(state);
        globals.set(
            predicate.registrar(),
            lua.create_function(move |_, args: Variadic<Value>| {
                let result = handle_arg(&args).and_then(|handle| {
                    let callback = marshal::name(args.get(1), 2)?;
                    event_state
                        .borrow_mut()
                        .register_event(handle, predicate, &callback)
                });
                if let Some(index) = finish(&event_state, predicate.registrar(), result) {
                    tracing::debug!(index, ?predicate, "event registered");
                }
                Ok(())
            })?,
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::bridge::install;
    use crate::events::Predicate;
    use crate::runtime::{RuntimeOptions, ScriptRuntime};
    use crate::state::BridgeState;
    use paxo_common::{SessionId, WidgetHandle};
    use paxo_config::{DisplayConfig, TriggerMode};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn run(source: &str) -> Rc<RefCell<BridgeState>> {
        let runtime = ScriptRuntime::new(&RuntimeOptions::default()).unwrap();
        let state = Rc::new(RefCell::new(BridgeState::new(
            SessionId::new(),
            DisplayConfig::default(),
            TriggerMode::Level,
        )));
        install(runtime.lua(), &state).unwrap();
        runtime.exec(source, "events").unwrap();
        state
    }

    #[test]
    fn on_click_and_on_release_register_records() {
        let state = run(
            r#"
            h = Gui("Label", 0, 0, 10, 10)
            onClick(h, "tapped")
            onRelease(h, "released")
            "#,
        );
        let state = state.borrow();
        let records = state.events().records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].handle, WidgetHandle(0));
        assert_eq!(records[0].predicate, Predicate::Touched);
        assert_eq!(records[0].callback, "tapped");
        assert_eq!(records[1].predicate, Predicate::Released);
    }

    #[test]
    fn registration_does_not_require_defined_callback() {
        let state = run("h = Gui('Box', 0, 0, 1, 1)\nonClick(h, 'notYetDefined')");
        assert_eq!(state.borrow().events().len(), 1);
        assert!(state.borrow().diagnostics().is_empty());
    }

    #[test]
    fn invalid_registrations_are_reported() {
        let state = run("onClick(3, 'cb')\nh = Gui('Box', 0, 0, 1, 1)\nonClick(h, true)");
        let state = state.borrow();
        assert!(state.events().is_empty());
        let diagnostics = state.diagnostics();
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].message, "invalid widget handle: 3");
        assert_eq!(
            diagnostics[1].message,
            "bad argument #2: expected string, got true"
        );
    }

    #[test]
    fn numeric_callback_name_is_converted() {
        let state = run("h = Gui('Box', 0, 0, 1, 1)\nonClick(h, 5)");
        let state = state.borrow();
        assert!(state.diagnostics().is_empty());
        assert_eq!(state.events().records()[0].callback, "5");
    }
}
