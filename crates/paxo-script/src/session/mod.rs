//! One script session: a Lua state, its widgets, and its event table.
//!
//! Sessions share nothing. Each owns its own [`ScriptRuntime`] and
//! [`BridgeState`], so two sessions in one process hand out overlapping
//! handles without interfering.


use std::cell::{Ref, RefCell};
use std::rc::Rc;

use paxo_common::{ConfigError, SessionId, WidgetHandle};
use paxo_config::{DisplayConfig, PaxoConfig, TriggerMode};
use tracing::{debug, info, warn};

use crate::bridge;
use crate::colors::ColorTable;
use crate::error::{BridgeError, ScriptError};
use crate::events::{dispatch_cycle, DispatchReport};
use crate::runtime::{RuntimeOptions, ScriptRuntime};
use crate::state::{BridgeState, Diagnostic};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Natives and constants installed; no script has run.
    Ready,
    /// Top-level code ran successfully.
    Loaded,
    /// The entry point has been called (whether or not it succeeded).
    Running,
    /// Top-level code failed to compile or run; nothing more will run.
    Aborted,
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Global function called after the top-level chunk.
    pub entry_point: String,
    pub runtime: RuntimeOptions,
    pub trigger: TriggerMode,
    pub display: DisplayConfig,
    pub colors: ColorTable,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            entry_point: "run".to_string(),
            runtime: RuntimeOptions::default(),
            trigger: TriggerMode::default(),
            display: DisplayConfig::default(),
            colors: ColorTable::builtin(),
        }
    }
}

impl SessionOptions {
    pub fn from_config(config: &PaxoConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            entry_point: config.script.entry_point.clone(),
            runtime: RuntimeOptions {
                memory_limit: config.script.memory_limit,
            },
            trigger: config.dispatch.trigger,
            display: config.display.clone(),
            colors: ColorTable::from_config(&config.colors)?,
        })
    }
}

pub struct Session {
    // Dropped first, releasing the native closures' references to `state`.
    runtime: ScriptRuntime,
    state: Rc<RefCell<BridgeState>>,
    id: SessionId,
    entry_point: String,
    phase: SessionPhase,
}

impl Session {
    /// Create the Lua state and install the bridge and color constants.
    pub fn new(options: &SessionOptions) -> Result<Self, ScriptError> {
        let id = SessionId::new();
        let runtime = ScriptRuntime::new(&options.runtime)?;
        let state = Rc::new(RefCell::new(BridgeState::new(
            id,
            options.display.clone(),
            options.trigger,
        )));

        bridge::install(runtime.lua(), &state).map_err(|e| ScriptError::Init(e.to_string()))?;
        options.colors.publish(&runtime)?;

        info!(session = %id, trigger = ?options.trigger, "script session started");
        Ok(Self {
            runtime,
            state,
            id,
            entry_point: options.entry_point.clone(),
            phase: SessionPhase::Ready,
        })
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    /// Run a chunk's top-level code. A failure aborts the session.
    pub fn execute(&mut self, source: &str, chunk_name: &str) -> Result<(), ScriptError> {
        if self.phase == SessionPhase::Aborted {
            return Err(ScriptError::NotLoaded);
        }
        match self.runtime.exec(source, chunk_name) {
            Ok(()) => {
                self.phase = SessionPhase::Loaded;
                debug!(session = %self.id, chunk = chunk_name, "top-level chunk executed");
                Ok(())
            }
            Err(err) => {
                self.phase = SessionPhase::Aborted;
                self.state.borrow_mut().report(chunk_name, &err);
                Err(err)
            }
        }
    }

    /// Call the entry point. Failures are reported and returned, but the
    /// session stays usable.
    pub fn call_entry_point(&mut self) -> Result<(), ScriptError> {
        if self.phase == SessionPhase::Aborted || self.phase == SessionPhase::Ready {
            return Err(ScriptError::NotLoaded);
        }
        self.phase = SessionPhase::Running;
        let result = self.runtime.call_function(&self.entry_point);
        if let Err(err) = &result {
            self.state.borrow_mut().report(&self.entry_point, err);
        }
        result
    }

    /// Execute `source` then call the entry point. Only a top-level failure
    /// is an error; a missing or failing entry point is just reported.
    pub fn boot(&mut self, source: &str, chunk_name: &str) -> Result<(), ScriptError> {
        self.execute(source, chunk_name)?;
        if let Err(err) = self.call_entry_point() {
            warn!(session = %self.id, error = %err, "entry point did not complete");
        }
        Ok(())
    }

    /// Evaluate every registered event once and run the callbacks that
    /// fire.
    pub fn dispatch(&self) -> DispatchReport {
        dispatch_cycle(&self.state, &self.runtime)
    }

    /// Close the frame on every widget. Returns how many needed a redraw.
    pub fn end_frame(&self) -> usize {
        self.state.borrow_mut().registry_mut().end_frame()
    }

    /// Feed touch state for one widget.
    pub fn set_touched(&self, handle: WidgetHandle, touched: bool) -> Result<(), BridgeError> {
        self.state
            .borrow_mut()
            .registry_mut()
            .resolve_mut(handle)?
            .set_touched(touched);
        Ok(())
    }

    /// Touch the front-most visible widget under a screen point. Only that
    /// widget is touched; containers underneath it are not.
    pub fn touch_at(&self, x: u16, y: u16) -> Option<WidgetHandle> {
        let mut state = self.state.borrow_mut();
        let registry = state.registry_mut();
        let handle = registry.hit_test(x, y).into_iter().next()?;
        if let Ok(widget) = registry.resolve_mut(handle) {
            widget.set_touched(true);
        }
        Some(handle)
    }

    /// Clear touch state on every widget, ahead of feeding a new frame's
    /// input.
    pub fn release_all(&self) {
        let mut state = self.state.borrow_mut();
        let registry = state.registry_mut();
        let handles: Vec<_> = registry.handles().collect();
        for handle in handles {
            if let Ok(widget) = registry.resolve_mut(handle) {
                widget.set_touched(false);
            }
        }
    }

    /// Borrow the bridge state. Do not hold it across [`Session::dispatch`].
    pub fn state(&self) -> Ref<'_, BridgeState> {
        self.state.borrow()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.state.borrow().diagnostics()
    }

    pub fn output(&self) -> Vec<String> {
        self.state.borrow().output()
    }

    pub fn runtime(&self) -> &ScriptRuntime {
        &self.runtime
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let state = self.state.borrow();
        info!(
            session = %self.id,
            widgets = state.registry().len(),
            events = state.events().len(),
            diagnostics = state.diagnostics().len(),
            "script session ended"
        );
    }
}
