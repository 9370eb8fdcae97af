//! # logh-adapters
//!
//! Concrete implementations of the ports: the leveled logger that encodes
//! events as JSON or console lines, and the output sinks it writes into.
//! This crate depends on `ports`, `shared`, and `config`.

mod encoder;
pub mod log_sink;
pub mod logger;

pub use log_sink::{BoundedWriter, CapacityExceeded, SharedWriter, send_to_stdout};
pub use logger::{Clock, Event, LoggerHandle};

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
