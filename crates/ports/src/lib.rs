//! # logh-ports
//!
//! Boundary contracts for the logh workspace.
//!
//! This crate defines the vocabulary shared between the contextual logger and
//! the leveled-logger collaborator: levels, formats, tagged values, and the
//! event builder traits. It depends only on `shared`.

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod level;
pub mod logger;
pub mod value;

pub use level::{LevelParseError, LogFormat, LogLevel, Severity};
pub use logger::{EventBuilder, LeveledLogger};
pub use value::{Attribute, Value};
