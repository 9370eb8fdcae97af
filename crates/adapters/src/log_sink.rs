//! Output destinations for emitted log lines.
//!
//! [`BoundedWriter`] is a fixed-capacity in-memory sink used to capture
//! output in tests; [`SharedWriter`] lets a caller keep reading a writer
//! after handing it to a logger.

use logh_shared::{ErrorCode, ErrorEnvelope};
use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A write ran out of room in a [`BoundedWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityExceeded {
    /// Bytes stored by the failing call before it hit the limit.
    pub written: usize,
    /// Fixed capacity of the writer.
    pub capacity: usize,
}

impl fmt::Display for CapacityExceeded {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "bounded writer is full ({} bytes written, capacity {})",
            self.written, self.capacity
        )
    }
}

impl std::error::Error for CapacityExceeded {}

impl From<CapacityExceeded> for ErrorEnvelope {
    fn from(error: CapacityExceeded) -> Self {
        Self::expected(ErrorCode::capacity_exceeded(), error.to_string())
            .with_metadata("written", error.written.to_string())
            .with_metadata("capacity", error.capacity.to_string())
    }
}

impl From<CapacityExceeded> for io::Error {
    fn from(error: CapacityExceeded) -> Self {
        Self::new(io::ErrorKind::WriteZero, error)
    }
}

/// Fixed-capacity byte sink.
///
/// Invariant: `0 <= index <= capacity`. The cursor only moves back through
/// [`BoundedWriter::reset`], which does not zero the old contents.
#[derive(Debug, Clone)]
pub struct BoundedWriter {
    buffer: Box<[u8]>,
    index: usize,
}

impl BoundedWriter {
    /// Allocate a writer holding at most `capacity` bytes.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: vec![0; capacity].into_boxed_slice(),
            index: 0,
        }
    }

    /// Store as many bytes of `bytes` as fit.
    ///
    /// Returns the number of bytes stored when everything fit. When the
    /// capacity is reached the prefix that fit stays written and the error
    /// reports its length.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<usize, CapacityExceeded> {
        let mut written = 0;
        for byte in bytes {
            let Some(slot) = self.buffer.get_mut(self.index) else {
                return Err(CapacityExceeded {
                    written,
                    capacity: self.capacity(),
                });
            };
            *slot = *byte;
            self.index += 1;
            written += 1;
        }
        Ok(written)
    }

    /// Move the cursor back to the start.
    pub const fn reset(&mut self) {
        self.index = 0;
    }

    /// Logical content, `buffer[0..index]`.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        self.buffer.get(..self.index).unwrap_or_default()
    }

    /// Logical content decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn as_str_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(self.bytes())
    }

    /// Number of bytes currently stored.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.index
    }

    /// Returns true when nothing is stored.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.index == 0
    }

    /// Fixed capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Bytes left before the writer is full.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.buffer.len() - self.index
    }
}

impl Write for BoundedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.write_bytes(buf) {
            Ok(written) => Ok(written),
            Err(error) if error.written > 0 => Ok(error.written),
            Err(error) => Err(error.into()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Cloneable handle over a writer behind a mutex.
///
/// Every clone writes into the same underlying writer.
#[derive(Debug, Default)]
pub struct SharedWriter<W> {
    inner: Arc<Mutex<W>>,
}

impl<W> SharedWriter<W> {
    /// Wrap `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(writer)),
        }
    }

    /// Lock the underlying writer. A poisoned lock is recovered.
    pub fn lock(&self) -> MutexGuard<'_, W> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W> Clone for SharedWriter<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W: Write> Write for SharedWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.lock().write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock().flush()
    }
}

/// Print `output` on stdout as a raw line, with no log formatting.
pub fn send_to_stdout(output: &str) {
    let mut stdout = io::stdout().lock();
    if let Err(error) = writeln!(stdout, "{output}") {
        tracing::warn!(target: "logh", %error, "stdout passthrough failed");
    }
}
