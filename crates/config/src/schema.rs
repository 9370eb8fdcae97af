//! Logger configuration schema.

use logh_ports::{LogFormat, LogLevel};
use logh_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};

/// Process-wide logger configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct LoggerConfig {
    /// Threshold below which events are dropped.
    pub level: LogLevel,
    /// Output encoding.
    pub format: LogFormat,
}

impl LoggerConfig {
    /// Build a config from explicit values.
    #[must_use]
    pub const fn new(level: LogLevel, format: LogFormat) -> Self {
        Self { level, format }
    }
}

/// Parse a config from JSON text.
pub fn parse_logger_config_json(input: &str) -> Result<LoggerConfig, ErrorEnvelope> {
    serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid config JSON: {error}"),
        )
        .with_metadata("source", "config")
    })
}

/// Parse a config from TOML text.
pub fn parse_logger_config_toml(input: &str) -> Result<LoggerConfig, ErrorEnvelope> {
    toml::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_toml"),
            format!("invalid config TOML: {error}"),
        )
        .with_metadata("source", "config")
    })
}
