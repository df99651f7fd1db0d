use std::cell::RefCell;
use std::rc::Rc;

use mlua::{Lua, Value, Variadic};

use super::{finish, handle_arg, required};
use crate::marshal;
use crate::state::{BridgeState, GeometryField};

pub(super) fn install(lua: &Lua, state: &Rc<RefCell<BridgeState>>) -> mlua::Result<()> {
    let globals = lua.globals();

    for field in GeometryField::ALL {
        let setter_state = Rc::clone(state);
        globals.set(
            field.setter(),
            lua.create_function(move |_, args: Variadic<Value>| {
                let result = handle_arg(&args).and_then(|handle| {
                    let value = marshal::integer(args.get(1), 2)?;
                    setter_state.borrow_mut().set_geometry(handle, field, value)
                });
                finish(&setter_state, field.setter(), result);
                Ok(())
            })?,
        )?;

        let getter_state = Rc::clone(state);
        globals.set(
            field.getter(),
            lua.create_function(move |_, args: Variadic<Value>| {
                let result = handle_arg(&args)
                    .and_then(|handle| getter_state.borrow().geometry(handle, field));
                Ok(finish(&getter_state, field.getter(), result).map(i64::from))
            })?,
        )?;
    }

    let color_state = Rc::clone(state);
    globals.set(
        "setColor",
        lua.create_function(move |_, args: Variadic<Value>| {
            let result = handle_arg(&args).and_then(|handle| {
                let color = marshal::color(required(&args, 2, "color")?, 2)?;
                color_state.borrow_mut().set_color(handle, color)
            });
            finish(&color_state, "setColor", result);
            Ok(())
        })?,
    )?;

    let text_state = Rc::clone(state);
    globals.set(
        "setText",
        lua.create_function(move |_, args: Variadic<Value>| {
            let result = handle_arg(&args).and_then(|handle| {
                let text = marshal::text(required(&args, 2, "string")?, 2)?;
                text_state.borrow_mut().set_text(handle, &text)
            });
            finish(&text_state, "setText", result);
            Ok(())
        })?,
    )?;

    Ok(())
}
