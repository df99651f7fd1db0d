pub mod errors;
pub mod id;
pub mod types;

pub use errors::{ConfigError, PaxoError};
pub use id::SessionId;
pub use types::{Color, Rect, WidgetHandle};
