//! Source locations attached by `error_line`.

use std::borrow::Cow;
use std::panic::Location;

/// File name used when no location is available.
pub const UNKNOWN_FILE: &str = "unknown";
/// Line number used when no location is available.
pub const UNKNOWN_LINE: i64 = -1;

/// Source file and line of a logging call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerLocation {
    /// Source file path as recorded by the compiler.
    pub file: Cow<'static, str>,
    /// One-based line number, or [`UNKNOWN_LINE`].
    pub line: i64,
}

impl CallerLocation {
    /// Location of the code calling this function (or of the nearest
    /// caller not marked `#[track_caller]`).
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self {
            file: Cow::Borrowed(location.file()),
            line: i64::from(location.line()),
        }
    }

    /// Build a location explicitly.
    pub fn new(file: impl Into<Cow<'static, str>>, line: i64) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// Sentinel for an unavailable location.
    #[must_use]
    pub const fn unknown() -> Self {
        Self {
            file: Cow::Borrowed(UNKNOWN_FILE),
            line: UNKNOWN_LINE,
        }
    }
}

impl From<&'static Location<'static>> for CallerLocation {
    fn from(location: &'static Location<'static>) -> Self {
        Self {
            file: Cow::Borrowed(location.file()),
            line: i64::from(location.line()),
        }
    }
}
