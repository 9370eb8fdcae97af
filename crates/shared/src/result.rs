//! Result helpers for shared error handling.

use crate::errors::ErrorEnvelope;
use std::fmt;

/// Shared result type used across the workspace.
pub type Result<T, E = ErrorEnvelope> = std::result::Result<T, E>;

/// Extension helpers for the workspace `Result`.
pub trait ResultExt<T, E> {
    /// Convert the error into an unrecoverable abort.
    ///
    /// This is the single place where the `must_*` calling convention turns a
    /// recoverable failure into a panic carrying the error's display text.
    fn or_abort(self) -> T
    where
        E: fmt::Display;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    #[allow(clippy::panic, reason = "must-style callers opt into fail-fast")]
    #[track_caller]
    fn or_abort(self) -> T
    where
        E: fmt::Display,
    {
        match self {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }
}
