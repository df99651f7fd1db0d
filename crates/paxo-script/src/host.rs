//! Host side of a script app: read the script, boot a session, and run the
//! frame loop.

use std::path::Path;
use std::time::{Duration, Instant};

use paxo_common::PaxoError;
use paxo_config::{DispatchConfig, DispatchMode, PaxoConfig};
use tracing::{debug, info};

use crate::error::ScriptError;
use crate::events::DispatchReport;
use crate::session::{Session, SessionOptions};

/// Script source read from disk (or handed over directly).
#[derive(Debug, Clone)]
pub struct LoadedScript {
    /// Chunk name shown in Lua error messages.
    pub name: String,
    pub source: String,
}

/// Read a script file. Nothing else happens until the script is run.
pub fn load_script(path: &Path) -> Result<LoadedScript, ScriptError> {
    let source = std::fs::read_to_string(path).map_err(|source| ScriptError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = source.len(), "script loaded");
    Ok(LoadedScript {
        name: chunk_name(path),
        source,
    })
}

fn chunk_name(path: &Path) -> String {
    path.file_name()
        .map(|name| format!("@{}", name.to_string_lossy()))
        .unwrap_or_else(|| "@script".to_string())
}

/// Platform input feed, polled at the start of every frame.
pub trait InputSource {
    /// Push this frame's touch state into the session (through
    /// [`Session::touch_at`] or [`Session::set_touched`]).
    fn poll(&mut self, frame: u64, session: &Session);

    fn quit_requested(&self) -> bool {
        false
    }
}

/// Input source for headless runs: never touches anything.
#[derive(Debug, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn poll(&mut self, _frame: u64, _session: &Session) {}
}

/// What a finished run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub callbacks_fired: usize,
    pub callbacks_failed: usize,
    pub redraws: usize,
    pub diagnostics: usize,
}

impl RunSummary {
    fn add(&mut self, report: DispatchReport, redraws: usize) {
        self.frames += 1;
        self.callbacks_fired += report.fired;
        self.callbacks_failed += report.failed;
        self.redraws += redraws;
    }
}

/// Owns the loaded script and drives a session over it.
pub struct ScriptHost {
    options: SessionOptions,
    dispatch: DispatchConfig,
    script: Option<LoadedScript>,
}

impl ScriptHost {
    pub fn new(config: &PaxoConfig) -> Result<Self, PaxoError> {
        Ok(Self {
            options: SessionOptions::from_config(config)?,
            dispatch: config.dispatch.clone(),
            script: None,
        })
    }

    pub fn load_script(&mut self, path: &Path) -> Result<(), ScriptError> {
        self.script = Some(load_script(path)?);
        Ok(())
    }

    /// Use in-memory source instead of a file.
    pub fn load_source(&mut self, name: &str, source: impl Into<String>) {
        self.script = Some(LoadedScript {
            name: name.to_string(),
            source: source.into(),
        });
    }

    /// Boot a session over the loaded script and run the frame loop.
    ///
    /// Each frame clears touch state, polls `input`, dispatches events,
    /// and closes the frame, then sleeps out the rest of the frame budget.
    /// The loop ends after one frame in single-shot mode, at
    /// `max_frames`, or when `input` asks to quit.
    pub fn run_app(&self, input: &mut dyn InputSource) -> Result<RunSummary, ScriptError> {
        let script = self.script.as_ref().ok_or(ScriptError::NotLoaded)?;
        let mut session = Session::new(&self.options)?;
        session.boot(&script.source, &script.name)?;

        let max_frames = match self.dispatch.mode {
            DispatchMode::SingleShot => 1,
            DispatchMode::Continuous => self.dispatch.max_frames,
        };
        let interval = self.dispatch.frame_interval();
        info!(
            session = %session.id(),
            mode = ?self.dispatch.mode,
            max_frames,
            interval_ms = interval.as_millis() as u64,
            "entering frame loop"
        );

        let mut summary = RunSummary::default();
        loop {
            if max_frames > 0 && summary.frames >= max_frames {
                break;
            }
            if input.quit_requested() {
                info!(session = %session.id(), "quit requested");
                break;
            }

            let started = Instant::now();
            session.release_all();
            input.poll(summary.frames, &session);
            let report = session.dispatch();
            let redraws = session.end_frame();
            summary.add(report, redraws);

            if max_frames == 0 || summary.frames < max_frames {
                pace(started, interval);
            }
        }

        summary.diagnostics = session.diagnostics().len();
        info!(
            session = %session.id(),
            frames = summary.frames,
            fired = summary.callbacks_fired,
            failed = summary.callbacks_failed,
            "frame loop finished"
        );
        Ok(summary)
    }
}

fn pace(started: Instant, interval: Duration) {
    let elapsed = started.elapsed();
    if elapsed < interval {
        std::thread::sleep(interval - elapsed);
    }
}
