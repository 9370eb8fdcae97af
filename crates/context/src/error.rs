//! Errors raised while building attribute sets.

use logh_shared::{ErrorCode, ErrorEnvelope};
use std::fmt;

/// Invalid key/value argument sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextError {
    /// The sequence has odd length, so the last key has no value.
    InvalidArgumentCount {
        /// Number of items supplied.
        count: usize,
    },
    /// An item in key position is not a string.
    NonStringKey {
        /// Zero-based index of the offending item.
        position: usize,
        /// Variant name of the offending item.
        kind: &'static str,
    },
}

impl ContextError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidArgumentCount { .. } => ErrorCode::invalid_argument_count(),
            Self::NonStringKey { .. } => ErrorCode::new("context", "non_string_key"),
        }
    }
}

impl fmt::Display for ContextError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgumentCount { count } => write!(
                formatter,
                "key/value arguments must come in pairs, got {count} items"
            ),
            Self::NonStringKey { position, kind } => {
                write!(formatter, "key at position {position} must be a string, got {kind}")
            },
        }
    }
}

impl std::error::Error for ContextError {}

impl From<ContextError> for ErrorEnvelope {
    fn from(error: ContextError) -> Self {
        let envelope = Self::expected(error.error_code(), error.to_string());
        match error {
            ContextError::InvalidArgumentCount { count } => {
                envelope.with_metadata("count", count.to_string())
            },
            ContextError::NonStringKey { position, kind } => envelope
                .with_metadata("position", position.to_string())
                .with_metadata("kind", kind),
        }
    }
}
