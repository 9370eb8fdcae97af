//! Contextual logger E2E tests against the console encoder and reconfiguration.

use chrono::{DateTime, FixedOffset, TimeZone};
use logh::prelude::*;
use logh::{LeveledLogger, Severity};
use std::error::Error;

type TestResult = Result<(), Box<dyn Error>>;

fn afternoon() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .and_then(|offset| offset.with_ymd_and_hms(2024, 6, 1, 15, 4, 0).single())
        .unwrap_or_default()
}

fn capture(capacity: usize) -> SharedWriter<BoundedWriter> {
    SharedWriter::new(BoundedWriter::new(capacity))
}

#[test]
fn console_line_has_kitchen_time_tag_message_and_context() -> TestResult {
    let sink = capture(256);
    let handle = LoggerHandle::new(LogLevel::Info, LogFormat::Console, sink.clone());
    handle.set_clock(afternoon);
    let logger = ContextualLogger::new(handle, kv!["context1", "test1", "attempt", 2_u8])?;

    if let Some(event) = logger.info() {
        event.str("peer", "10.0.0.1 east").msg("hello world");
    }

    assert_eq!(
        sink.lock().as_str_lossy(),
        "3:04PM INF hello world context1=test1 attempt=2 peer=\"10.0.0.1 east\"\n"
    );
    Ok(())
}

#[test]
fn silent_and_none_disable_every_accessor() -> TestResult {
    for level in [LogLevel::Silent, LogLevel::None] {
        let sink = capture(64);
        let handle = LoggerHandle::new(level, LogFormat::Console, sink.clone());
        let logger = ContextualLogger::new(handle, kv!["k", "v"])?;

        assert!(logger.debug().is_none());
        assert!(logger.info().is_none());
        assert!(logger.warn().is_none());
        assert!(logger.error().is_none());
        assert!(logger.error_line().is_none());
        assert!(logger.fatal().is_none());
        assert!(logger.panic().is_none());
        assert!(sink.lock().is_empty());
    }
    Ok(())
}

#[test]
fn reconfiguration_reaches_existing_contextual_loggers() -> TestResult {
    let first = capture(256);
    let handle = LoggerHandle::new(LogLevel::Error, LogFormat::Json, first.clone());
    handle.set_clock(afternoon);
    let logger = ContextualLogger::new(handle.clone(), kv!["job", "sync"])?;
    assert!(logger.info().is_none());

    let second = capture(256);
    handle.configure_custom(LogLevel::Debug, LogFormat::Console, second.clone());

    assert!(logger.logger().enabled(Severity::Debug));
    if let Some(event) = logger.debug() {
        event.msg("resumed");
    }
    assert!(first.lock().is_empty());
    assert_eq!(second.lock().as_str_lossy(), "3:04PM DBG resumed job=sync\n");
    Ok(())
}

#[test]
fn derived_loggers_log_from_other_threads() -> TestResult {
    let sink = capture(1024);
    let handle = LoggerHandle::new(LogLevel::Info, LogFormat::Console, sink.clone());
    handle.set_clock(afternoon);
    let parent = ContextualLogger::new(handle, kv!["app", "svc"])?;

    let workers: Vec<_> = (0_u8..3)
        .map(|worker| {
            let child = parent.create_from_context(kv!["worker", worker]);
            std::thread::spawn(move || {
                if let Some(event) = child.ok().and_then(|child| child.info()) {
                    event.msg("tick");
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().map_err(|_| "worker panicked")?;
    }

    let output = sink.lock().as_str_lossy().into_owned();
    assert_eq!(output.lines().count(), 3);
    for worker in 0..3 {
        assert!(output.contains(&format!("3:04PM INF tick app=svc worker={worker}\n")));
    }
    assert_eq!(parent.contexts(), kv!["app", "svc"]);
    Ok(())
}
