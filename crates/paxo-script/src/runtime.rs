//! Thin adapter over the Lua state.
//!
//! Everything the rest of the crate needs from Lua goes through here:
//! compiling and running source, publishing constants, and calling a
//! global function by name.

use mlua::{Lua, LuaOptions, StdLib, Value};
use tracing::debug;

use crate::error::ScriptError;
use crate::events::CallbackInvoker;

/// Runtime construction options.
#[derive(Debug, Clone, Default)]
pub struct RuntimeOptions {
    /// Lua heap ceiling in bytes; `0` leaves the heap unbounded.
    ///
    /// Allocation itself goes through the process global allocator, so a
    /// memory-constrained target plugs its allocator in with
    /// `#[global_allocator]` and uses this limit to keep scripts in budget.
    pub memory_limit: usize,
}

pub struct ScriptRuntime {
    lua: Lua,
}

impl ScriptRuntime {
    pub fn new(options: &RuntimeOptions) -> Result<Self, ScriptError> {
        let lua = Lua::new_with(StdLib::ALL_SAFE, LuaOptions::default())
            .map_err(|e| ScriptError::Init(e.to_string()))?;

        if options.memory_limit > 0 {
            lua.set_memory_limit(options.memory_limit)
                .map_err(|e| ScriptError::Init(e.to_string()))?;
            debug!(limit = options.memory_limit, "script memory limit set");
        }

        Ok(Self { lua })
    }

    pub fn lua(&self) -> &Lua {
        &self.lua
    }

    /// Publish an integer into the script's global namespace.
    pub fn set_constant(&self, name: &str, value: i64) -> Result<(), ScriptError> {
        self.lua.globals().set(name, value)?;
        Ok(())
    }

    /// Compile `source` and run its top-level statements.
    ///
    /// The chunk is compiled before anything runs, so a syntax error
    /// surfaces as [`ScriptError::Parse`] with no side effects.
    pub fn exec(&self, source: &str, chunk_name: &str) -> Result<(), ScriptError> {
        let function = self
            .lua
            .load(source)
            .set_name(chunk_name)
            .into_function()?;
        function.call::<_, ()>(())?;
        Ok(())
    }

    /// Call a global function with no arguments, discarding its results.
    pub fn call_function(&self, name: &str) -> Result<(), ScriptError> {
        let value: Value = self.lua.globals().get(name)?;
        match value {
            Value::Function(function) => {
                function.call::<_, ()>(())?;
                Ok(())
            }
            Value::Nil => Err(ScriptError::MissingFunction(name.to_string())),
            _ => Err(ScriptError::NotAFunction(name.to_string())),
        }
    }
}

impl CallbackInvoker for ScriptRuntime {
    fn invoke(&self, callback: &str) -> Result<(), ScriptError> {
        self.call_function(callback)
    }
}
