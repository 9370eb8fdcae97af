//! Contextual logger E2E tests against the JSON encoder.

use chrono::{DateTime, FixedOffset, TimeZone};
use logh::prelude::*;
use logh::{CallerLocation, FILE_KEY, LINE_KEY};
use std::error::Error;

type TestResult = Result<(), Box<dyn Error>>;

fn fixed_clock() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .and_then(|offset| offset.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).single())
        .unwrap_or_default()
}

fn json_logger(level: LogLevel, capacity: usize) -> (LoggerHandle, SharedWriter<BoundedWriter>) {
    let sink = SharedWriter::new(BoundedWriter::new(capacity));
    let handle = LoggerHandle::new(level, LogFormat::Json, sink.clone());
    handle.set_clock(fixed_clock);
    (handle, sink)
}

fn output(sink: &SharedWriter<BoundedWriter>) -> String {
    sink.lock().as_str_lossy().into_owned()
}

#[test]
fn info_event_carries_context_before_time_and_message() -> TestResult {
    let (handle, sink) = json_logger(LogLevel::Info, 256);
    let logger = ContextualLogger::new(handle, kv!["context1", "test1"])?;

    if let Some(event) = logger.info() {
        event.msg("hello world");
    }

    assert_eq!(
        output(&sink),
        "{\"level\":\"info\",\"context1\":\"test1\",\"time\":\"2024-01-02T03:04:05Z\",\"message\":\"hello world\"}\n"
    );
    let parsed: serde_json::Value = serde_json::from_str(output(&sink).trim())?;
    assert_eq!(parsed["context1"], "test1");
    Ok(())
}

#[test]
fn disabled_debug_leaves_buffer_unchanged() -> TestResult {
    let (handle, sink) = json_logger(LogLevel::Info, 256);
    let logger = ContextualLogger::new(handle, kv!["context1", "test1"])?;

    assert!(logger.debug().is_none());
    assert!(sink.lock().is_empty());
    Ok(())
}

#[test]
fn typed_context_keeps_its_encoding() -> TestResult {
    let (handle, sink) = json_logger(LogLevel::Debug, 512);
    let logger = ContextualLogger::new(
        handle,
        kv![
            "context3", "test3", "context4", true, "small", -3_i8, "large", u64::MAX,
            "ratio", 0.25_f32, "tags", serde_json::json!(["a", "b"]),
        ],
    )?;

    if let Some(event) = logger.debug() {
        event.i32("extra", 7).msg("typed");
    }

    let parsed: serde_json::Value = serde_json::from_str(output(&sink).trim())?;
    assert_eq!(parsed["level"], "debug");
    assert_eq!(parsed["context3"], "test3");
    assert_eq!(parsed["context4"], true);
    assert_eq!(parsed["small"], -3);
    assert_eq!(parsed["large"], serde_json::json!(u64::MAX));
    assert_eq!(parsed["ratio"], 0.25);
    assert_eq!(parsed["tags"], serde_json::json!(["a", "b"]));
    assert_eq!(parsed["extra"], 7);
    assert!(output(&sink).starts_with("{\"level\":\"debug\",\"context3\":\"test3\",\"context4\":true,"));
    Ok(())
}

#[test]
fn append_and_derive_scope_attributes() -> TestResult {
    let (handle, sink) = json_logger(LogLevel::Info, 1024);
    let mut parent = ContextualLogger::new(handle, kv!["service", "billing"])?;
    parent.append(kv!["region", "eu"])?;
    let child = parent.create_from_context(kv!["request", 42_u32])?;

    if let Some(event) = parent.warn() {
        event.msg("parent");
    }
    let parent_line = output(&sink);
    sink.lock().reset();

    if let Some(event) = child.warn() {
        event.msg("child");
    }
    let child_line = output(&sink);

    assert!(parent_line.contains("\"service\":\"billing\",\"region\":\"eu\",\"time\""));
    assert!(!parent_line.contains("request"));
    assert!(child_line.contains("\"service\":\"billing\",\"region\":\"eu\",\"request\":42,\"time\""));
    Ok(())
}

#[test]
fn error_line_reports_this_call_site() -> TestResult {
    let (handle, sink) = json_logger(LogLevel::Info, 512);
    let logger = ContextualLogger::new(handle, kv!["context1", "test1"])?;

    let expected_line = i64::from(line!()) + 1;
    if let Some(event) = logger.error_line() {
        event.msg("failed");
    }

    let line = output(&sink);
    let parsed: serde_json::Value = serde_json::from_str(line.trim())?;
    let file = parsed[FILE_KEY].as_str().unwrap_or_default();
    assert!(file.ends_with("contextual_json.rs"), "unexpected file {file}");
    assert_eq!(parsed[LINE_KEY], expected_line);
    assert!(line.starts_with("{\"level\":\"error\",\"@file\":"));
    assert!(line.find("\"@line\"") < line.find("\"context1\""));
    Ok(())
}

#[test]
fn explicit_and_missing_locations() -> TestResult {
    let (handle, sink) = json_logger(LogLevel::Info, 512);
    let logger = ContextualLogger::new(handle, kv![])?;

    if let Some(event) = logger.error_line_at(None) {
        event.send();
    }
    assert_eq!(
        output(&sink),
        "{\"level\":\"error\",\"@file\":\"unknown\",\"@line\":-1,\"time\":\"2024-01-02T03:04:05Z\"}\n"
    );

    sink.lock().reset();
    if let Some(event) = logger.error_line_at(Some(CallerLocation::new("src/job.rs", 12))) {
        event.msg("explicit");
    }
    assert!(output(&sink).contains("\"@file\":\"src/job.rs\",\"@line\":12"));
    Ok(())
}

#[test]
fn sorted_loggers_emit_keys_alphabetically() -> TestResult {
    let (handle, sink) = json_logger(LogLevel::Info, 512);
    let logger = ContextualLogger::new(handle, kv!["zone", "b", "app", "a"])?
        .with_order(AttributeOrder::SortedByKey);

    if let Some(event) = logger.info() {
        event.send();
    }
    assert!(output(&sink).starts_with("{\"level\":\"info\",\"app\":\"a\",\"zone\":\"b\","));
    Ok(())
}

#[test]
fn small_writer_keeps_only_the_prefix() -> TestResult {
    let (handle, sink) = json_logger(LogLevel::Info, 24);
    let logger = ContextualLogger::new(handle, kv!["context1", "test1"])?;

    if let Some(event) = logger.info() {
        event.msg("hello world");
    }

    let writer = sink.lock();
    assert_eq!(writer.len(), 24);
    assert_eq!(writer.bytes(), b"{\"level\":\"info\",\"context");
    assert_eq!(writer.remaining(), 0);
    Ok(())
}

#[test]
fn reset_starts_the_next_capture_fresh() -> TestResult {
    let (handle, sink) = json_logger(LogLevel::Info, 256);
    let logger = ContextualLogger::new(handle, kv!["n", 1_u8])?;

    if let Some(event) = logger.info() {
        event.msg("first message is longer");
    }
    sink.lock().reset();
    if let Some(event) = logger.info() {
        event.msg("second");
    }

    assert_eq!(
        output(&sink),
        "{\"level\":\"info\",\"n\":1,\"time\":\"2024-01-02T03:04:05Z\",\"message\":\"second\"}\n"
    );
    Ok(())
}
