//! Config loading helpers (env + file).
//!
//! The loader is responsible for deterministic merge order and surfacing
//! user-facing errors as typed `ErrorEnvelope`s.

use crate::schema::{LoggerConfig, parse_logger_config_json, parse_logger_config_toml};
use crate::{LoggerEnv, apply_env_overrides};
use logh_shared::{ErrorClass, ErrorCode, ErrorEnvelope};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

/// Load the logger config from sources using a deterministic precedence order.
///
/// Precedence (highest wins):
/// - env overrides (`LoggerEnv`)
/// - config JSON (file content)
/// - defaults (`LoggerConfig::default()`)
pub fn load_logger_config_from_sources(
    config_json: Option<&str>,
    env: &LoggerEnv,
) -> Result<LoggerConfig, ErrorEnvelope> {
    let config = match config_json {
        None => LoggerConfig::default(),
        Some(input) => parse_logger_config_json(input)?,
    };

    Ok(finish(config, env))
}

/// Load the logger config from an optional file path.
///
/// The format is picked from the extension: `.toml` is TOML, `.json` or no
/// extension is JSON.
pub fn load_logger_config_from_path(
    config_path: Option<&Path>,
    env: &LoggerEnv,
) -> Result<LoggerConfig, ErrorEnvelope> {
    let config = match config_path {
        None => LoggerConfig::default(),
        Some(path) => {
            let format = detect_config_format(path)?;
            let config_text = read_config_file(path)?;
            match format {
                ConfigFormat::Json => parse_logger_config_json(&config_text),
                ConfigFormat::Toml => parse_logger_config_toml(&config_text),
            }
            .map_err(|error| error.with_metadata("path", path.to_string_lossy().to_string()))?
        },
    };

    Ok(finish(config, env))
}

/// Load the logger config from std env and an optional file path.
pub fn load_logger_config_std_env(
    config_path: Option<&Path>,
) -> Result<LoggerConfig, ErrorEnvelope> {
    let env = LoggerEnv::from_std_env().map_err(ErrorEnvelope::from)?;
    load_logger_config_from_path(config_path, &env)
}

/// Serialize the config as deterministic pretty JSON (with trailing newline).
pub fn to_pretty_json(config: &LoggerConfig) -> Result<String, ErrorEnvelope> {
    let mut output = serde_json::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::internal(),
            format!("failed to serialize config: {error}"),
            ErrorClass::NonRetriable,
        )
    })?;
    output.push('\n');
    Ok(output)
}

/// Serialize the config as deterministic pretty TOML (with trailing newline).
pub fn to_pretty_toml(config: &LoggerConfig) -> Result<String, ErrorEnvelope> {
    let mut output = toml::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("config", "serialize_toml"),
            format!("failed to serialize config TOML: {error}"),
            ErrorClass::NonRetriable,
        )
    })?;
    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

fn finish(config: LoggerConfig, env: &LoggerEnv) -> LoggerConfig {
    // env is applied last.
    let config = apply_env_overrides(config, env);
    tracing::debug!(
        level = %config.level,
        format = %config.format,
        "resolved logger config"
    );
    config
}

fn read_config_file(path: &Path) -> Result<String, ErrorEnvelope> {
    std::fs::read_to_string(path).map_err(|error| {
        let code = match error.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::new("config", "config_file_not_found"),
            std::io::ErrorKind::PermissionDenied => {
                ErrorCode::new("config", "config_file_permission_denied")
            },
            _ => ErrorCode::new("config", "config_file_io"),
        };

        ErrorEnvelope::expected(code, format!("failed to read config file: {error}"))
            .with_metadata("path", path.to_string_lossy().to_string())
    })
}

fn detect_config_format(path: &Path) -> Result<ConfigFormat, ErrorEnvelope> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        None | Some("json") => Ok(ConfigFormat::Json),
        Some("toml") => Ok(ConfigFormat::Toml),
        Some(other) => Err(ErrorEnvelope::expected(
            ErrorCode::new("config", "unsupported_format"),
            "unsupported config format; use .json or .toml",
        )
        .with_metadata("extension", other.to_string())),
    }
}
