//! Attribute-carrying decorator over a [`LeveledLogger`].

use crate::caller::CallerLocation;
use crate::error::ContextError;
use logh_ports::{Attribute, EventBuilder, LeveledLogger, Severity, Value};
use logh_shared::{ErrorEnvelope, ResultExt};

/// Field name for the caller's source file.
pub const FILE_KEY: &str = "@file";
/// Field name for the caller's source line.
pub const LINE_KEY: &str = "@line";

/// How stored attributes are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AttributeOrder {
    /// Order of insertion.
    #[default]
    Insertion,
    /// Stable lexicographic order by key; equal keys keep insertion order.
    SortedByKey,
}

/// A logger that attaches a fixed set of attributes to every event.
///
/// Attributes only grow: `append` adds pairs in place and derivation copies
/// the current set into an independent logger. Mutation takes `&mut self`,
/// so a shared instance cannot be appended to concurrently without a lock
/// supplied by the caller.
#[derive(Debug, Clone)]
pub struct ContextualLogger<L> {
    logger: L,
    attributes: Vec<Attribute>,
    order: AttributeOrder,
}

impl<L> ContextualLogger<L>
where
    L: LeveledLogger + Clone,
{
    /// Create a logger from alternating key/value items.
    pub fn new(logger: L, key_values: Vec<Value>) -> Result<Self, ContextError> {
        Ok(Self {
            logger,
            attributes: pairs(key_values)?,
            order: AttributeOrder::Insertion,
        })
    }

    /// Like [`ContextualLogger::new`], panicking on invalid arguments.
    #[must_use]
    #[track_caller]
    pub fn must_new(logger: L, key_values: Vec<Value>) -> Self {
        Self::new(logger, key_values)
            .map_err(ErrorEnvelope::from)
            .or_abort()
    }

    /// Switch the ordering policy, reordering the current attributes.
    #[must_use]
    pub fn with_order(mut self, order: AttributeOrder) -> Self {
        self.order = order;
        self.reorder();
        self
    }

    /// Add alternating key/value items. On error nothing is added.
    pub fn append(&mut self, key_values: Vec<Value>) -> Result<(), ContextError> {
        let added = pairs(key_values)?;
        self.attributes.extend(added);
        self.reorder();
        Ok(())
    }

    /// Like [`ContextualLogger::append`], panicking on invalid arguments.
    #[track_caller]
    pub fn must_append(&mut self, key_values: Vec<Value>) {
        self.append(key_values)
            .map_err(ErrorEnvelope::from)
            .or_abort();
    }

    /// Derive a logger holding a copy of these attributes plus `key_values`.
    ///
    /// The receiver is left untouched.
    pub fn create_from_context(&self, key_values: Vec<Value>) -> Result<Self, ContextError> {
        let mut derived = self.clone();
        derived.append(key_values)?;
        Ok(derived)
    }

    /// Like [`ContextualLogger::create_from_context`], panicking on invalid
    /// arguments.
    #[must_use]
    #[track_caller]
    pub fn must_create_from_context(&self, key_values: Vec<Value>) -> Self {
        self.create_from_context(key_values)
            .map_err(ErrorEnvelope::from)
            .or_abort()
    }

    /// Stored attributes flattened back into alternating key/value items.
    #[must_use]
    pub fn contexts(&self) -> Vec<Value> {
        self.attributes
            .iter()
            .flat_map(|attribute| [Value::Str(attribute.key.clone()), attribute.value.clone()])
            .collect()
    }

    /// Stored attributes in their current order.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Number of stored attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns true when no attribute is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Current ordering policy.
    #[must_use]
    pub const fn order(&self) -> AttributeOrder {
        self.order
    }

    /// Underlying leveled logger.
    #[must_use]
    pub const fn logger(&self) -> &L {
        &self.logger
    }

    /// Info event with the attributes attached, or `None` when disabled.
    #[must_use]
    pub fn info(&self) -> Option<L::Event> {
        self.event(Severity::Info)
    }

    /// Debug event with the attributes attached, or `None` when disabled.
    #[must_use]
    pub fn debug(&self) -> Option<L::Event> {
        self.event(Severity::Debug)
    }

    /// Warn event with the attributes attached, or `None` when disabled.
    #[must_use]
    pub fn warn(&self) -> Option<L::Event> {
        self.event(Severity::Warn)
    }

    /// Error event with the attributes attached, or `None` when disabled.
    #[must_use]
    pub fn error(&self) -> Option<L::Event> {
        self.event(Severity::Error)
    }

    /// Fatal event with the attributes attached, or `None` when disabled.
    #[must_use]
    pub fn fatal(&self) -> Option<L::Event> {
        self.event(Severity::Fatal)
    }

    /// Panic event with the attributes attached, or `None` when disabled.
    #[must_use]
    pub fn panic(&self) -> Option<L::Event> {
        self.event(Severity::Panic)
    }

    /// Error event carrying the caller's `@file` and `@line`, attached
    /// before the stored attributes.
    #[must_use]
    #[track_caller]
    pub fn error_line(&self) -> Option<L::Event> {
        self.error_line_at(Some(CallerLocation::caller()))
    }

    /// Error event carrying an explicit location. `None` attaches
    /// `"unknown"` and `-1`.
    #[must_use]
    pub fn error_line_at(&self, location: Option<CallerLocation>) -> Option<L::Event> {
        let event = self.logger.event(Severity::Error)?;
        let location = location.unwrap_or_else(CallerLocation::unknown);
        let event = event
            .str(FILE_KEY, &location.file)
            .i64(LINE_KEY, location.line);
        Some(self.attach_all(event))
    }

    /// Event for any severity with the attributes attached.
    #[must_use]
    pub fn event(&self, severity: Severity) -> Option<L::Event> {
        let event = self.logger.event(severity)?;
        Some(self.attach_all(event))
    }

    fn attach_all(&self, event: L::Event) -> L::Event {
        self.attributes.iter().fold(event, attach)
    }

    fn reorder(&mut self) {
        if self.order == AttributeOrder::SortedByKey {
            self.attributes.sort_by(|left, right| left.key.cmp(&right.key));
        }
    }
}

fn attach<E: EventBuilder>(event: E, attribute: &Attribute) -> E {
    let key = attribute.key.as_str();
    match &attribute.value {
        Value::Str(value) => event.str(key, value),
        Value::I8(value) => event.i8(key, *value),
        Value::I16(value) => event.i16(key, *value),
        Value::I32(value) => event.i32(key, *value),
        Value::I64(value) => event.i64(key, *value),
        Value::Isize(value) => event.isize(key, *value),
        Value::U8(value) => event.u8(key, *value),
        Value::U16(value) => event.u16(key, *value),
        Value::U32(value) => event.u32(key, *value),
        Value::U64(value) => event.u64(key, *value),
        Value::Usize(value) => event.usize(key, *value),
        Value::F32(value) => event.f32(key, *value),
        Value::F64(value) => event.f64(key, *value),
        Value::Bool(value) => event.bool(key, *value),
        Value::Opaque(value) => event.opaque(key, value),
    }
}

fn pairs(key_values: Vec<Value>) -> Result<Vec<Attribute>, ContextError> {
    let count = key_values.len();
    if count % 2 != 0 {
        return Err(ContextError::InvalidArgumentCount { count });
    }

    let mut attributes = Vec::with_capacity(count / 2);
    let mut items = key_values.into_iter().enumerate();
    while let Some((position, key)) = items.next() {
        let key = match key {
            Value::Str(key) => key,
            other => {
                return Err(ContextError::NonStringKey {
                    position,
                    kind: other.kind(),
                });
            },
        };
        let Some((_, value)) = items.next() else {
            return Err(ContextError::InvalidArgumentCount { count });
        };
        attributes.push(Attribute { key, value });
    }
    Ok(attributes)
}
