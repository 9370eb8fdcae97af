//! Log levels, event severities, and output formats.

use logh_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Configured threshold of a logger.
///
/// `None` and `Silent` are thresholds only: no event severity passes them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Info and above.
    #[default]
    Info,
    /// Everything.
    Debug,
    /// Warn and above.
    Warn,
    /// Error and above.
    Error,
    /// Fatal and above.
    Fatal,
    /// Panic only.
    Panic,
    /// No severity-bearing event is enabled.
    None,
    /// Logging is disabled.
    Silent,
}

impl LogLevel {
    /// All thresholds in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Info,
        Self::Debug,
        Self::Warn,
        Self::Error,
        Self::Fatal,
        Self::Panic,
        Self::None,
        Self::Silent,
    ];

    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
            Self::Panic => "panic",
            Self::None => "none",
            Self::Silent => "silent",
        }
    }

    const fn rank(self) -> u8 {
        match self {
            Self::Debug => 0,
            Self::Info => 1,
            Self::Warn => 2,
            Self::Error => 3,
            Self::Fatal => 4,
            Self::Panic => 5,
            Self::None => 6,
            Self::Silent => 7,
        }
    }

    /// Returns true when an event of `severity` passes this threshold.
    #[must_use]
    pub const fn allows(self, severity: Severity) -> bool {
        severity.rank() >= self.rank()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LevelParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalized = input.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == normalized)
            .ok_or_else(|| LevelParseError::UnknownLevel {
                input: input.to_string(),
            })
    }
}

/// Severity of a single log event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Debug.
    Debug,
    /// Info.
    Info,
    /// Warn.
    Warn,
    /// Error.
    Error,
    /// Fatal: the process exits after the event is written.
    Fatal,
    /// Panic: the caller unwinds after the event is written.
    Panic,
}

impl Severity {
    /// All severities from least to most severe.
    pub const ALL: [Self; 6] = [
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Fatal,
        Self::Panic,
    ];

    /// Value of the `level` field in JSON output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
            Self::Panic => "panic",
        }
    }

    /// Three-letter tag used by console output.
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Debug => "DBG",
            Self::Info => "INF",
            Self::Warn => "WRN",
            Self::Error => "ERR",
            Self::Fatal => "FTL",
            Self::Panic => "PNC",
        }
    }

    const fn rank(self) -> u8 {
        match self {
            Self::Debug => 0,
            Self::Info => 1,
            Self::Warn => 2,
            Self::Error => 3,
            Self::Fatal => 4,
            Self::Panic => 5,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Output encoding of emitted lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Human-readable text line.
    Console,
}

impl LogFormat {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Console => "console",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = LevelParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "console" => Ok(Self::Console),
            _ => Err(LevelParseError::UnknownFormat {
                input: input.to_string(),
            }),
        }
    }
}

/// Failures parsing level and format names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelParseError {
    /// Not one of the eight level names.
    UnknownLevel {
        /// Raw input.
        input: String,
    },
    /// Neither `json` nor `console`.
    UnknownFormat {
        /// Raw input.
        input: String,
    },
}

impl fmt::Display for LevelParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownLevel { input } => write!(
                formatter,
                "unknown log level {input:?}; expected info, debug, warn, error, fatal, panic, none or silent"
            ),
            Self::UnknownFormat { input } => {
                write!(formatter, "unknown log format {input:?}; expected json or console")
            },
        }
    }
}

impl std::error::Error for LevelParseError {}

impl From<LevelParseError> for ErrorEnvelope {
    fn from(error: LevelParseError) -> Self {
        let message = error.to_string();
        match error {
            LevelParseError::UnknownLevel { input } => {
                Self::expected(ErrorCode::new("ports", "invalid_level"), message)
                    .with_metadata("input", input)
            },
            LevelParseError::UnknownFormat { input } => {
                Self::expected(ErrorCode::new("ports", "invalid_format"), message)
                    .with_metadata("input", input)
            },
        }
    }
}
