//! # logh-context
//!
//! Contextual loggers: reusable attribute sets attached to every event
//! handed out by an underlying [`logh_ports::LeveledLogger`].
//! This crate depends on `ports` and `shared`.

mod caller;
mod contextual;
mod error;

pub use caller::{CallerLocation, UNKNOWN_FILE, UNKNOWN_LINE};
pub use contextual::{AttributeOrder, ContextualLogger, FILE_KEY, LINE_KEY};
pub use error::ContextError;

/// Returns the context crate version.
#[must_use]
pub const fn context_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
