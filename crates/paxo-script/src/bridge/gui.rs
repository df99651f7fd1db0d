use std::cell::RefCell;
use std::rc::Rc;

use mlua::{Lua, Value, Variadic};
use paxo_common::{Rect, WidgetHandle};
use paxo_widgets::clamp_coord;

use super::finish;
use crate::error::BridgeError;
use crate::marshal;
use crate::state::BridgeState;

pub(super) fn install(lua: &Lua, state: &Rc<RefCell<BridgeState>>) -> mlua::Result<()> {
    let globals = lua.globals();

    let print_state = Rc::clone(state);
    globals.set(
        "print",
        lua.create_function(move |_, args: Variadic<Value>| {
            let line = args
                .iter()
                .filter_map(marshal::print_fragment)
                .collect::<Vec<_>>()
                .join("\t");
            print_state.borrow_mut().record_output(line);
            Ok(())
        })?,
    )?;

    // Gui(kind, x, y, width, height[, parent]) -> handle
    let gui_state = Rc::clone(state);
    globals.set(
        "Gui",
        lua.create_function(move |_, args: Variadic<Value>| {
            let result = gui_args(&args).and_then(|(kind, rect, parent)| {
                gui_state.borrow_mut().create_widget(&kind, rect, parent)
            });
            Ok(finish(&gui_state, "Gui", result).map(|handle| i64::from(handle.0)))
        })?,
    )?;

    Ok(())
}

fn gui_args(args: &[Value]) -> Result<(String, Rect, Option<WidgetHandle>), BridgeError> {
    let kind = marshal::name(args.first(), 1)?;
    let x = marshal::integer(args.get(1), 2)?;
    let y = marshal::integer(args.get(2), 3)?;
    let width = marshal::integer(args.get(3), 4)?;
    let height = marshal::integer(args.get(4), 5)?;
    let parent = marshal::optional_handle(args.get(5))?;
    let rect = Rect::new(
        clamp_coord(x),
        clamp_coord(y),
        clamp_coord(width),
        clamp_coord(height),
    );
    Ok((kind, rect, parent))
}
