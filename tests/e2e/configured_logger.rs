//! Config-driven logger construction E2E tests.

use logh::prelude::*;
use logh::{ENV_LOG_FORMAT, ENV_LOG_LEVEL, ErrorCode, LoggerConfig, logger_from_env_map};
use std::collections::BTreeMap;
use std::error::Error;
use std::path::{Path, PathBuf};

type TestResult = Result<(), Box<dyn Error>>;

fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| manifest_dir.to_path_buf())
}

fn fixture_path(relative: &str) -> PathBuf {
    workspace_root()
        .join("crates")
        .join("config")
        .join("tests")
        .join("fixtures")
        .join(relative)
}

fn env(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect()
}

#[test]
fn toml_file_configures_the_handle() -> TestResult {
    let path = fixture_path("logger.valid.toml");
    let handle = logger_from_env_map(Some(path.as_path()), &BTreeMap::new())?;
    assert_eq!(handle.config(), LoggerConfig::new(LogLevel::Warn, LogFormat::Console));
    Ok(())
}

#[test]
fn env_overrides_win_over_the_file() -> TestResult {
    let path = fixture_path("logger.valid.json");
    let handle = logger_from_env_map(
        Some(path.as_path()),
        &env(&[(ENV_LOG_LEVEL, "error"), (ENV_LOG_FORMAT, "console")]),
    )?;
    assert_eq!(handle.level(), LogLevel::Error);
    assert_eq!(handle.format(), LogFormat::Console);
    Ok(())
}

#[test]
fn invalid_file_reports_path_metadata() {
    let path = fixture_path("logger.invalid.json");
    let Err(error) = logger_from_env_map(Some(path.as_path()), &BTreeMap::new()) else {
        panic!("verbose is not a level");
    };
    assert_eq!(error.code, ErrorCode::new("config", "invalid_json"));
    assert!(error.metadata.contains_key("path"));
}

#[test]
fn missing_file_is_reported() {
    let path = fixture_path("does-not-exist.json");
    let Err(error) = logger_from_env_map(Some(path.as_path()), &BTreeMap::new()) else {
        panic!("the file does not exist");
    };
    assert_eq!(error.code, ErrorCode::new("config", "config_file_not_found"));
}

#[test]
fn configured_handle_can_be_redirected_for_capture() -> TestResult {
    let handle = logger_from_env_map(None, &env(&[(ENV_LOG_LEVEL, "debug")]))?;
    let sink = SharedWriter::new(BoundedWriter::new(256));
    handle.configure_custom(handle.level(), LogFormat::Json, sink.clone());

    let logger = ContextualLogger::new(handle, kv!["context1", "test1"])?;
    if let Some(event) = logger.debug() {
        event.msg("captured");
    }

    let line = sink.lock().as_str_lossy().into_owned();
    let parsed: serde_json::Value = serde_json::from_str(line.trim())?;
    assert_eq!(parsed["level"], "debug");
    assert_eq!(parsed["context1"], "test1");
    assert_eq!(parsed["message"], "captured");
    assert!(parsed["time"].is_string());
    Ok(())
}
