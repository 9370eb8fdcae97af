//! Environment variable parsing and env-to-config merging.
//!
//! Env parsing is strict: a variable that is present must carry a valid,
//! non-empty value. Names are matched in priority order, so the prefixed
//! variable wins over its alias when both are set.

use crate::schema::LoggerConfig;
use logh_ports::{LogFormat, LogLevel};
use logh_shared::{ErrorCode, ErrorEnvelope};
use std::collections::BTreeMap;
use std::fmt;

/// Env var: log level threshold.
pub const ENV_LOG_LEVEL: &str = "LOGH_LOG_LEVEL";
/// Env var: log level threshold (alias).
pub const ENV_LOG_LEVEL_ALIAS: &str = "LOG_LEVEL";
/// Env var: output format (`json` | `console`).
pub const ENV_LOG_FORMAT: &str = "LOGH_LOG_FORMAT";
/// Env var: output format (alias).
pub const ENV_LOG_FORMAT_ALIAS: &str = "LOG_FORMAT";

const ALL_VARS: [&str; 4] = [
    ENV_LOG_LEVEL,
    ENV_LOG_LEVEL_ALIAS,
    ENV_LOG_FORMAT,
    ENV_LOG_FORMAT_ALIAS,
];

/// Logger overrides read from the environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoggerEnv {
    /// Level override.
    pub level: Option<LogLevel>,
    /// Format override.
    pub format: Option<LogFormat>,
}

impl LoggerEnv {
    /// Parse env overrides from a key/value map (useful for tests and fixtures).
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            level: parse_optional_any(map, &[ENV_LOG_LEVEL, ENV_LOG_LEVEL_ALIAS])?,
            format: parse_optional_any(map, &[ENV_LOG_FORMAT, ENV_LOG_FORMAT_ALIAS])?,
        })
    }

    /// Parse env overrides from the current process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let mut map = BTreeMap::new();
        for name in ALL_VARS {
            if let Ok(value) = std::env::var(name) {
                map.insert(name.to_string(), value);
            }
        }
        Self::from_map(&map)
    }

    /// Returns true when no override is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.level.is_none() && self.format.is_none()
    }
}

/// Apply env overrides on top of a config.
#[must_use]
pub fn apply_env_overrides(mut config: LoggerConfig, env: &LoggerEnv) -> LoggerConfig {
    if let Some(level) = env.level {
        config.level = level;
    }
    if let Some(format) = env.format {
        config.format = format;
    }
    config
}

/// Validation failures when parsing env variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Enum env var had an invalid value.
    InvalidEnum {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_env_var"),
            Self::InvalidEnum { .. } => ErrorCode::new("config", "invalid_env_enum"),
        }
    }
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty"),
            Self::InvalidEnum { var, .. } => write!(formatter, "{var} has an unsupported value"),
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            EnvParseError::EmptyValue { var } => envelope.with_metadata("env_var", var),
            EnvParseError::InvalidEnum { var, value } => envelope
                .with_metadata("env_var", var)
                .with_metadata("value", value),
        }
    }
}

fn parse_optional<T>(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<T>, EnvParseError>
where
    T: std::str::FromStr,
{
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    trimmed
        .parse::<T>()
        .map(Some)
        .map_err(|_| EnvParseError::InvalidEnum {
            var,
            value: raw.clone(),
        })
}

fn parse_optional_any<T>(
    map: &BTreeMap<String, String>,
    vars: &[&'static str],
) -> Result<Option<T>, EnvParseError>
where
    T: std::str::FromStr,
{
    for var in vars {
        if map.contains_key(*var) {
            return parse_optional(map, var);
        }
    }
    Ok(None)
}
