//! Leveled event-logging boundary contract.

use crate::level::Severity;

/// A not-yet-emitted log record accepting typed fields.
///
/// Setters consume and return the builder so calls chain. Fields must be
/// emitted in the order the setters are called; a repeated key is emitted
/// again rather than replacing the earlier field.
pub trait EventBuilder: Sized {
    /// Attach a string field.
    fn str(self, key: &str, value: &str) -> Self;
    /// Attach an `i8` field.
    fn i8(self, key: &str, value: i8) -> Self;
    /// Attach an `i16` field.
    fn i16(self, key: &str, value: i16) -> Self;
    /// Attach an `i32` field.
    fn i32(self, key: &str, value: i32) -> Self;
    /// Attach an `i64` field.
    fn i64(self, key: &str, value: i64) -> Self;
    /// Attach an `isize` field.
    fn isize(self, key: &str, value: isize) -> Self;
    /// Attach a `u8` field.
    fn u8(self, key: &str, value: u8) -> Self;
    /// Attach a `u16` field.
    fn u16(self, key: &str, value: u16) -> Self;
    /// Attach a `u32` field.
    fn u32(self, key: &str, value: u32) -> Self;
    /// Attach a `u64` field.
    fn u64(self, key: &str, value: u64) -> Self;
    /// Attach a `usize` field.
    fn usize(self, key: &str, value: usize) -> Self;
    /// Attach an `f32` field.
    fn f32(self, key: &str, value: f32) -> Self;
    /// Attach an `f64` field.
    fn f64(self, key: &str, value: f64) -> Self;
    /// Attach a boolean field.
    fn bool(self, key: &str, value: bool) -> Self;
    /// Attach a structured field using its default JSON encoding.
    fn opaque(self, key: &str, value: &serde_json::Value) -> Self;
}

/// Source of level-gated events.
pub trait LeveledLogger {
    /// Event type handed out for enabled severities.
    type Event: EventBuilder;

    /// Returns an event for `severity`, or `None` when that severity is disabled.
    fn event(&self, severity: Severity) -> Option<Self::Event>;

    /// Returns true when `severity` would currently yield an event.
    fn enabled(&self, severity: Severity) -> bool;
}
