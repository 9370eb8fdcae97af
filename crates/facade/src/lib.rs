//! # logh
//!
//! Facade API for consumers. Re-exports the contextual logger bound to the
//! concrete [`LoggerHandle`], the bounded writer, and config loading.
//! This crate depends on `adapters`, `config`, `context`, `ports`, and `shared`.
//!
//! ```
//! use logh::prelude::*;
//!
//! let sink = SharedWriter::new(BoundedWriter::new(256));
//! let handle = LoggerHandle::new(LogLevel::Info, LogFormat::Json, sink.clone());
//! let logger = ContextualLogger::new(handle, kv!["service", "billing"])?;
//! if let Some(event) = logger.info() {
//!     event.u16("port", 8080).msg("listening");
//! }
//! assert!(sink.lock().as_str_lossy().contains("\"service\":\"billing\",\"port\":8080"));
//! # Ok::<(), ContextError>(())
//! ```

use std::collections::BTreeMap;
use std::path::Path;

pub use logh_adapters::{
    BoundedWriter, CapacityExceeded, Clock, Event, LoggerHandle, SharedWriter, send_to_stdout,
};
pub use logh_config::{
    ENV_LOG_FORMAT, ENV_LOG_FORMAT_ALIAS, ENV_LOG_LEVEL, ENV_LOG_LEVEL_ALIAS, EnvParseError,
    LoggerConfig, LoggerEnv, load_logger_config_from_path, load_logger_config_from_sources,
    load_logger_config_std_env,
};
pub use logh_context::{
    AttributeOrder, CallerLocation, ContextError, FILE_KEY, LINE_KEY, UNKNOWN_FILE, UNKNOWN_LINE,
};
pub use logh_ports::{
    Attribute, EventBuilder, LevelParseError, LeveledLogger, LogFormat, LogLevel, Severity, Value,
    kv,
};
pub use logh_shared::{ErrorCode, ErrorEnvelope};

/// Contextual logger over the workspace's leveled logger.
pub type ContextualLogger = logh_context::ContextualLogger<LoggerHandle>;

/// Common imports for callers.
pub mod prelude {
    pub use crate::{
        AttributeOrder, BoundedWriter, ContextError, ContextualLogger, EventBuilder, LogFormat,
        LogLevel, LoggerHandle, SharedWriter, Value, kv,
    };
}

/// Returns the facade crate version.
#[must_use]
pub const fn facade_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Build a stdout logger from a resolved config.
#[must_use]
pub fn logger_from_config(config: &LoggerConfig) -> LoggerHandle {
    LoggerHandle::from_config(config)
}

/// Build a stdout logger from an optional config file and explicit env overrides.
pub fn logger_from_env_map(
    config_path: Option<&Path>,
    env: &BTreeMap<String, String>,
) -> Result<LoggerHandle, ErrorEnvelope> {
    let env = LoggerEnv::from_map(env).map_err(ErrorEnvelope::from)?;
    let config = load_logger_config_from_path(config_path, &env)?;
    Ok(logger_from_config(&config))
}

/// Build a stdout logger from an optional config file and the process env.
pub fn logger_from_std_env(config_path: Option<&Path>) -> Result<LoggerHandle, ErrorEnvelope> {
    let config = load_logger_config_std_env(config_path)?;
    Ok(logger_from_config(&config))
}
