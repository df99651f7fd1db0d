//! Lua bridge for paxo widgets.
//!
//! A script builds its UI through native functions (`Gui`, `setX`,
//! `setColor`, `onClick`, ...) that all go through one [`Session`]:
//! - [`registry::Registry`] owns every widget and hands the script dense
//!   integer handles instead of references
//! - [`marshal`] turns untyped Lua values into handles, coordinates,
//!   colors, and text
//! - [`events`] keeps the `onClick`-style registrations and fires the named
//!   Lua callbacks once per frame
//! - [`host::ScriptHost`] loads a script, boots a session, and runs the
//!   frame loop

pub mod bridge;
pub mod colors;
pub mod error;
pub mod events;
pub mod host;
pub mod marshal;
pub mod registry;
pub mod runtime;
pub mod session;
pub mod state;

pub use colors::ColorTable;
pub use error::{BridgeError, ScriptError};
pub use events::{CallbackInvoker, DispatchReport, EventRecord, Predicate};
pub use host::{load_script, InputSource, LoadedScript, NoInput, RunSummary, ScriptHost};
pub use registry::Registry;
pub use runtime::{RuntimeOptions, ScriptRuntime};
pub use session::{Session, SessionOptions, SessionPhase};
pub use state::{BridgeState, Diagnostic, GeometryField};
