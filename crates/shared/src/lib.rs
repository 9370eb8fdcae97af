//! # logh-shared
//!
//! Shared result types and error handling for the logh workspace.
//!
//! This crate provides foundational types that are used across all other crates:
//!
//! - [`ErrorEnvelope`] and its classification types
//! - The workspace [`Result`] alias and the [`ResultExt::or_abort`] fail-fast helper
//!
//! ## Design Principles
//!
//! 1. **No workspace dependencies** - This crate only depends on external crates
//! 2. **Serde-compatible** - All public types support serialization

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod errors;
pub mod result;

pub use errors::{ErrorClass, ErrorCode, ErrorEnvelope, ErrorKind, ErrorMetadata};
pub use result::{Result, ResultExt};

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
