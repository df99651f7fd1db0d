use std::path::PathBuf;

use paxo_widgets::WidgetError;

/// Failures of the script runtime itself: loading, compiling, running.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("failed to read script {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no script loaded")]
    NotLoaded,

    #[error("failed to initialise script runtime: {0}")]
    Init(String),

    #[error("script parse error: {0}")]
    Parse(String),

    #[error("script runtime error: {0}")]
    Runtime(String),

    #[error("script function '{0}' is not defined")]
    MissingFunction(String),

    #[error("script global '{0}' is not a function")]
    NotAFunction(String),

    #[error("script memory limit exceeded: {0}")]
    Memory(String),
}

impl From<mlua::Error> for ScriptError {
    fn from(err: mlua::Error) -> Self {
        match err {
            mlua::Error::SyntaxError { message, .. } => ScriptError::Parse(message),
            mlua::Error::MemoryError(message) => ScriptError::Memory(message),
            other => ScriptError::Runtime(other.to_string()),
        }
    }
}

/// Failures of a single bridge call. None of these end the session: the
/// call is reported and becomes a no-op.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    #[error("invalid widget handle: {0}")]
    InvalidHandle(String),

    #[error("unknown widget kind '{0}'")]
    UnknownWidgetKind(String),

    #[error(transparent)]
    TypeMismatch(#[from] WidgetError),

    #[error("bad argument #{position}: expected {expected}, got {found}")]
    BadArgument {
        position: usize,
        expected: &'static str,
        found: String,
    },

    #[error("widget registry is full")]
    RegistryFull,
}
