//! Native functions exposed to scripts.
//!
//! Each function captures the session's [`BridgeState`] and performs one
//! registry operation. Failures never raise Lua errors: they are reported
//! to the session diagnostics and the call does nothing (getters return
//! `nil`).

mod events;
mod gui;
mod properties;

use std::cell::RefCell;
use std::rc::Rc;

use mlua::{Lua, Value};
use paxo_common::WidgetHandle;

use crate::error::BridgeError;
use crate::marshal;
use crate::state::BridgeState;

/// Every global the bridge installs.
pub const NATIVE_FUNCTIONS: &[&str] = &[
    "print",
    "Gui",
    "setX",
    "setY",
    "setWidth",
    "setHeight",
    "getX",
    "getY",
    "getWidth",
    "getHeight",
    "setColor",
    "setText",
    "onClick",
    "onRelease",
];

/// Register the native function catalogue in `lua`'s globals.
pub fn install(lua: &Lua, state: &Rc<RefCell<BridgeState>>) -> mlua::Result<()> {
    gui::install(lua, state)?;
    properties::install(lua, state)?;
    events::install(lua, state)?;
    tracing::debug!(count = NATIVE_FUNCTIONS.len(), "bridge installed");
    Ok(())
}

/// First argument as a widget handle. A missing handle is invalid, not a
/// bad argument.
fn handle_arg(args: &[Value]) -> Result<WidgetHandle, BridgeError> {
    match args.first() {
        Some(value) => marshal::handle(value),
        None => Err(BridgeError::InvalidHandle("nil".into())),
    }
}

fn required<'a, 'lua>(
    args: &'a [Value<'lua>],
    position: usize,
    expected: &'static str,
) -> Result<&'a Value<'lua>, BridgeError> {
    args.get(position - 1)
        .ok_or_else(|| BridgeError::BadArgument {
            position,
            expected,
            found: "no value".into(),
        })
}

/// Turn a bridge result into the value handed back to Lua, reporting the
/// failure if there is one.
fn finish<T>(state: &RefCell<BridgeState>, operation: &str, result: Result<T, BridgeError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            state.borrow_mut().report(operation, &err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{RuntimeOptions, ScriptRuntime};
    use paxo_common::SessionId;
    use paxo_config::{DisplayConfig, TriggerMode};

    fn setup() -> (ScriptRuntime, Rc<RefCell<BridgeState>>) {
        let runtime = ScriptRuntime::new(&RuntimeOptions::default()).unwrap();
        let state = Rc::new(RefCell::new(BridgeState::new(
            SessionId::new(),
            DisplayConfig::default(),
            TriggerMode::Level,
        )));
        install(runtime.lua(), &state).unwrap();
        (runtime, state)
    }

    #[test]
    fn installs_every_native_function() {
        let (runtime, _state) = setup();
        for name in NATIVE_FUNCTIONS {
            let value: Value = runtime.lua().globals().get(*name).unwrap();
            assert!(matches!(value, Value::Function(_)), "{name} missing");
        }
    }

    #[test]
    fn gui_returns_dense_handles() {
        let (runtime, state) = setup();
        runtime
            .exec(
                r#"
                a = Gui("Window", 0, 0, 320, 480)
                b = Gui("Box", 10, 10, 100, 50, a)
                c = Gui("Label", 5, 5, 80, 20, b)
                "#,
                "gui",
            )
            .unwrap();
        let globals = runtime.lua().globals();
        assert_eq!(globals.get::<_, i64>("a").unwrap(), 0);
        assert_eq!(globals.get::<_, i64>("b").unwrap(), 1);
        assert_eq!(globals.get::<_, i64>("c").unwrap(), 2);
        assert_eq!(
            state.borrow().registry().children(WidgetHandle(1)).unwrap(),
            &[WidgetHandle(2)]
        );
    }

    #[test]
    fn unknown_kind_returns_nil_and_reports() {
        let (runtime, state) = setup();
        runtime
            .exec(r#"h = Gui("Button", 0, 0, 10, 10)"#, "gui")
            .unwrap();
        let h: Value = runtime.lua().globals().get("h").unwrap();
        assert!(matches!(h, Value::Nil));
        let diagnostics = state.borrow().diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].operation, "Gui");
        assert!(state.borrow().registry().is_empty());
    }

    #[test]
    fn bad_parent_creates_nothing() {
        let (runtime, state) = setup();
        runtime
            .exec(r#"h = Gui("Label", 0, 0, 10, 10, 4)"#, "gui")
            .unwrap();
        assert!(state.borrow().registry().is_empty());
        assert_eq!(
            state.borrow().diagnostics()[0].message,
            "invalid widget handle: 4"
        );
    }

    #[test]
    fn print_goes_to_output() {
        let (runtime, state) = setup();
        runtime
            .exec(r#"print("hello", 42, nil, 1.5)"#, "print")
            .unwrap();
        assert_eq!(state.borrow().output(), vec!["hello\t42\t1.5"]);
    }
}
