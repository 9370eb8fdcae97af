//! Leveled structured logger emitting JSON or console lines.
//!
//! [`LoggerHandle`] owns the shared configuration (threshold, format, output
//! destination, clock) behind a single mutex. Every clone sees every
//! reconfiguration. Event acquisition takes a snapshot of the configuration,
//! so an [`Event`] already handed out keeps the destination it was built for.

use crate::encoder::{Field, Record, encode_console, encode_json};
use chrono::{DateTime, FixedOffset, Local};
use logh_config::LoggerConfig;
use logh_ports::{EventBuilder, LeveledLogger, LogFormat, LogLevel, Severity};
use logh_shared::ErrorEnvelope;
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Source of event timestamps.
pub type Clock = Arc<dyn Fn() -> DateTime<FixedOffset> + Send + Sync>;

type Sink = Arc<Mutex<Box<dyn Write + Send>>>;

struct LoggerState {
    level: LogLevel,
    format: LogFormat,
    sink: Sink,
    clock: Clock,
}

/// Shared, reconfigurable leveled logger.
#[derive(Clone)]
pub struct LoggerHandle {
    state: Arc<Mutex<LoggerState>>,
}

impl LoggerHandle {
    /// Create a logger writing to `writer`.
    pub fn new<W>(level: LogLevel, format: LogFormat, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            state: Arc::new(Mutex::new(LoggerState {
                level,
                format,
                sink: boxed_sink(writer),
                clock: local_clock(),
            })),
        }
    }

    /// Create a logger writing to stdout.
    #[must_use]
    pub fn stdout(level: LogLevel, format: LogFormat) -> Self {
        Self::new(level, format, io::stdout())
    }

    /// Create a stdout logger from a loaded config.
    #[must_use]
    pub fn from_config(config: &LoggerConfig) -> Self {
        Self::stdout(config.level, config.format)
    }

    /// Reconfigure level and format, writing to stdout.
    pub fn configure(&self, level: LogLevel, format: LogFormat) {
        self.configure_custom(level, format, io::stdout());
    }

    /// Reconfigure level, format, and output destination.
    pub fn configure_custom<W>(&self, level: LogLevel, format: LogFormat, writer: W)
    where
        W: Write + Send + 'static,
    {
        let mut state = self.lock();
        state.level = level;
        state.format = format;
        state.sink = boxed_sink(writer);
        drop(state);
        tracing::debug!(target: "logh", %level, %format, "logger reconfigured");
    }

    /// Change only the threshold.
    pub fn set_level(&self, level: LogLevel) {
        self.lock().level = level;
        tracing::debug!(target: "logh", %level, "logger level changed");
    }

    /// Replace the timestamp source.
    pub fn set_clock<F>(&self, clock: F)
    where
        F: Fn() -> DateTime<FixedOffset> + Send + Sync + 'static,
    {
        self.lock().clock = Arc::new(clock);
    }

    /// Current threshold.
    #[must_use]
    pub fn level(&self) -> LogLevel {
        self.lock().level
    }

    /// Current output format.
    #[must_use]
    pub fn format(&self) -> LogFormat {
        self.lock().format
    }

    /// Current level and format as a config value.
    #[must_use]
    pub fn config(&self) -> LoggerConfig {
        let state = self.lock();
        LoggerConfig::new(state.level, state.format)
    }

    /// Returns true when `severity` passes the current threshold.
    #[must_use]
    pub fn is_enabled(&self, severity: Severity) -> bool {
        self.lock().level.allows(severity)
    }

    /// Severities that currently yield events, least severe first.
    #[must_use]
    pub fn enabled_levels(&self) -> Vec<Severity> {
        let level = self.level();
        Severity::ALL
            .into_iter()
            .filter(|severity| level.allows(*severity))
            .collect()
    }

    /// Debug event, if enabled.
    #[must_use]
    pub fn debug(&self) -> Option<Event> {
        self.event_for(Severity::Debug)
    }

    /// Info event, if enabled.
    #[must_use]
    pub fn info(&self) -> Option<Event> {
        self.event_for(Severity::Info)
    }

    /// Warn event, if enabled.
    #[must_use]
    pub fn warn(&self) -> Option<Event> {
        self.event_for(Severity::Warn)
    }

    /// Error event, if enabled.
    #[must_use]
    pub fn error(&self) -> Option<Event> {
        self.event_for(Severity::Error)
    }

    /// Fatal event, if enabled. Emitting it exits the process.
    #[must_use]
    pub fn fatal(&self) -> Option<Event> {
        self.event_for(Severity::Fatal)
    }

    /// Panic event, if enabled. Emitting it panics.
    #[must_use]
    pub fn panic(&self) -> Option<Event> {
        self.event_for(Severity::Panic)
    }

    /// Flush the current output destination.
    pub fn flush(&self) -> Result<(), ErrorEnvelope> {
        let sink = Arc::clone(&self.lock().sink);
        let mut writer = sink.lock().unwrap_or_else(PoisonError::into_inner);
        writer.flush().map_err(ErrorEnvelope::from)
    }

    fn event_for(&self, severity: Severity) -> Option<Event> {
        let state = self.lock();
        if !state.level.allows(severity) {
            return None;
        }
        Some(Event {
            severity,
            format: state.format,
            fields: Vec::new(),
            sink: Arc::clone(&state.sink),
            clock: Arc::clone(&state.clock),
        })
    }

    fn lock(&self) -> MutexGuard<'_, LoggerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for LoggerHandle {
    fn default() -> Self {
        Self::from_config(&LoggerConfig::default())
    }
}

impl fmt::Debug for LoggerHandle {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        formatter
            .debug_struct("LoggerHandle")
            .field("level", &state.level)
            .field("format", &state.format)
            .finish_non_exhaustive()
    }
}

impl LeveledLogger for LoggerHandle {
    type Event = Event;

    fn event(&self, severity: Severity) -> Option<Event> {
        self.event_for(severity)
    }

    fn enabled(&self, severity: Severity) -> bool {
        self.is_enabled(severity)
    }
}

/// A log record being built. Nothing is written until [`Event::msg`] or
/// [`Event::send`]; dropping the event discards it.
pub struct Event {
    severity: Severity,
    format: LogFormat,
    fields: Vec<(String, Field)>,
    sink: Sink,
    clock: Clock,
}

impl Event {
    /// Severity this event was acquired for.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Attach an error under the `error` key.
    #[must_use]
    pub fn err(self, error: &dyn std::error::Error) -> Self {
        self.push("error", Field::Text(error.to_string()))
    }

    /// Attach any serializable value with its JSON encoding.
    ///
    /// If encoding fails the failure text is attached as a string instead.
    #[must_use]
    pub fn serialize<T>(self, key: &str, value: &T) -> Self
    where
        T: Serialize + ?Sized,
    {
        let field = match serde_json::to_string(value) {
            Ok(json) => Field::Json(json),
            Err(error) => Field::Text(format!("marshal error: {error}")),
        };
        self.push(key, field)
    }

    /// Emit with `message`.
    pub fn msg(self, message: &str) {
        self.emit(Some(message));
    }

    /// Emit with a formatted message.
    pub fn msgf(self, args: fmt::Arguments<'_>) {
        let message = args.to_string();
        self.emit(Some(&message));
    }

    /// Emit without a message.
    pub fn send(self) {
        self.emit(None);
    }

    fn push(mut self, key: &str, field: Field) -> Self {
        self.fields.push((key.to_string(), field));
        self
    }

    #[allow(clippy::panic, reason = "panic-severity events unwind after emission")]
    fn emit(self, message: Option<&str>) {
        let record = Record {
            severity: self.severity,
            fields: &self.fields,
            time: (self.clock)(),
            message,
        };
        let line = match self.format {
            LogFormat::Json => encode_json(&record),
            LogFormat::Console => encode_console(&record),
        };
        write_line(&self.sink, &line);

        match self.severity {
            Severity::Fatal => std::process::exit(1),
            Severity::Panic => panic!("{}", message.unwrap_or_default()),
            Severity::Debug | Severity::Info | Severity::Warn | Severity::Error => {},
        }
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Event")
            .field("severity", &self.severity)
            .field("format", &self.format)
            .field("fields", &self.fields.len())
            .finish_non_exhaustive()
    }
}

impl EventBuilder for Event {
    fn str(self, key: &str, value: &str) -> Self {
        self.push(key, Field::Text(value.to_string()))
    }

    fn i8(self, key: &str, value: i8) -> Self {
        self.push(key, Field::display(value))
    }

    fn i16(self, key: &str, value: i16) -> Self {
        self.push(key, Field::display(value))
    }

    fn i32(self, key: &str, value: i32) -> Self {
        self.push(key, Field::display(value))
    }

    fn i64(self, key: &str, value: i64) -> Self {
        self.push(key, Field::display(value))
    }

    fn isize(self, key: &str, value: isize) -> Self {
        self.push(key, Field::display(value))
    }

    fn u8(self, key: &str, value: u8) -> Self {
        self.push(key, Field::display(value))
    }

    fn u16(self, key: &str, value: u16) -> Self {
        self.push(key, Field::display(value))
    }

    fn u32(self, key: &str, value: u32) -> Self {
        self.push(key, Field::display(value))
    }

    fn u64(self, key: &str, value: u64) -> Self {
        self.push(key, Field::display(value))
    }

    fn usize(self, key: &str, value: usize) -> Self {
        self.push(key, Field::display(value))
    }

    fn f32(self, key: &str, value: f32) -> Self {
        self.push(key, Field::float32(value))
    }

    fn f64(self, key: &str, value: f64) -> Self {
        self.push(key, Field::float64(value))
    }

    fn bool(self, key: &str, value: bool) -> Self {
        self.push(key, Field::display(value))
    }

    fn opaque(self, key: &str, value: &serde_json::Value) -> Self {
        self.push(key, Field::Json(value.to_string()))
    }
}

fn boxed_sink<W>(writer: W) -> Sink
where
    W: Write + Send + 'static,
{
    Arc::new(Mutex::new(Box::new(writer)))
}

fn local_clock() -> Clock {
    Arc::new(|| Local::now().fixed_offset())
}

fn write_line(sink: &Sink, line: &str) {
    let mut writer = sink.lock().unwrap_or_else(PoisonError::into_inner);
    let result = writer
        .write_all(line.as_bytes())
        .and_then(|()| writer.flush());
    drop(writer);
    if let Err(error) = result {
        tracing::warn!(target: "logh", %error, "could not write log event");
    }
}
