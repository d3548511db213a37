//! Byte sinks for encoding big-endian binary data.

use std::io::Write;

use crate::error::{ByteError, ByteResult};
use crate::MAX_UTF_LEN;

/// Destination for encoded bytes.
///
/// Only [`write_bytes`](Self::write_bytes) is required; the fixed-width
/// writers are provided and always emit big-endian.
pub trait ByteSink {
    /// Appends raw bytes to the sink.
    fn write_bytes(&mut self, bytes: &[u8]) -> ByteResult<()>;

    /// Writes a single signed byte.
    fn write_i8(&mut self, value: i8) -> ByteResult<()> {
        self.write_bytes(&value.to_be_bytes())
    }

    /// Writes a big-endian `i16`.
    fn write_i16(&mut self, value: i16) -> ByteResult<()> {
        self.write_bytes(&value.to_be_bytes())
    }

    /// Writes a big-endian `i32`.
    fn write_i32(&mut self, value: i32) -> ByteResult<()> {
        self.write_bytes(&value.to_be_bytes())
    }

    /// Writes a big-endian `i64`.
    fn write_i64(&mut self, value: i64) -> ByteResult<()> {
        self.write_bytes(&value.to_be_bytes())
    }

    /// Writes an IEEE 754 `f32` as its big-endian bit pattern.
    fn write_f32(&mut self, value: f32) -> ByteResult<()> {
        self.write_bytes(&value.to_bits().to_be_bytes())
    }

    /// Writes an IEEE 754 `f64` as its big-endian bit pattern.
    fn write_f64(&mut self, value: f64) -> ByteResult<()> {
        self.write_bytes(&value.to_bits().to_be_bytes())
    }

    /// Writes a string as a big-endian `u16` byte length followed by UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`ByteError::StringTooLong`] if the UTF-8 form exceeds
    /// [`MAX_UTF_LEN`] bytes. Nothing is written in that case.
    fn write_utf(&mut self, value: &str) -> ByteResult<()> {
        let len = u16::try_from(value.len()).map_err(|_| ByteError::StringTooLong {
            len: value.len(),
            max: MAX_UTF_LEN,
        })?;
        self.write_bytes(&len.to_be_bytes())?;
        self.write_bytes(value.as_bytes())
    }
}

/// A growable in-memory sink.
///
/// Call [`finish`](Self::finish) to get the final byte buffer.
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    bytes: Vec<u8>,
}

impl ByteWriter {
    /// Creates a new empty `ByteWriter`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `ByteWriter` with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
        }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn bytes_written(&self) -> usize {
        self.bytes.len()
    }

    /// Returns the bytes written so far without consuming the writer.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Finishes writing and returns the byte buffer.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }

    /// Finishes writing and appends to the provided buffer.
    pub fn finish_into(mut self, buf: &mut Vec<u8>) {
        buf.append(&mut self.bytes);
    }
}

impl ByteSink for ByteWriter {
    fn write_bytes(&mut self, bytes: &[u8]) -> ByteResult<()> {
        self.bytes.extend_from_slice(bytes);
        Ok(())
    }
}

impl ByteSink for Vec<u8> {
    fn write_bytes(&mut self, bytes: &[u8]) -> ByteResult<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// Adapts any [`std::io::Write`] into a [`ByteSink`].
///
/// I/O failures surface as [`ByteError::Io`].
#[derive(Debug)]
pub struct IoSink<W> {
    inner: W,
    written: usize,
}

impl<W: Write> IoSink<W> {
    /// Wraps a writer.
    pub const fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    /// Returns the number of bytes handed to the writer so far.
    #[must_use]
    pub const fn bytes_written(&self) -> usize {
        self.written
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> ByteResult<()> {
        self.inner.flush().map_err(ByteError::from)
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> ByteSink for IoSink<W> {
    fn write_bytes(&mut self, bytes: &[u8]) -> ByteResult<()> {
        self.inner.write_all(bytes)?;
        self.written += bytes.len();
        Ok(())
    }
}
