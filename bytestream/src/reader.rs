//! Byte sources with bounded operations.

use std::io::{ErrorKind, Read};

use crate::error::{ByteError, ByteResult};

/// Origin of encoded bytes.
///
/// Only [`read_exact`](Self::read_exact) is required; the fixed-width readers
/// are provided and always decode big-endian. Reading past the end fails with
/// [`ByteError::UnexpectedEof`] instead of blocking or panicking.
pub trait ByteSource {
    /// Fills `buf` completely or fails without a partial guarantee.
    fn read_exact(&mut self, buf: &mut [u8]) -> ByteResult<()>;

    /// Returns the number of bytes left, if the source knows it.
    fn remaining(&self) -> Option<usize> {
        None
    }

    /// Reads `N` bytes into an array.
    fn read_array<const N: usize>(&mut self) -> ByteResult<[u8; N]> {
        let mut out = [0u8; N];
        self.read_exact(&mut out)?;
        Ok(out)
    }

    /// Reads a single signed byte.
    fn read_i8(&mut self) -> ByteResult<i8> {
        Ok(i8::from_be_bytes(self.read_array::<1>()?))
    }

    /// Reads a big-endian `i16`.
    fn read_i16(&mut self) -> ByteResult<i16> {
        Ok(i16::from_be_bytes(self.read_array::<2>()?))
    }

    /// Reads a big-endian `i32`.
    fn read_i32(&mut self) -> ByteResult<i32> {
        Ok(i32::from_be_bytes(self.read_array::<4>()?))
    }

    /// Reads a big-endian `i64`.
    fn read_i64(&mut self) -> ByteResult<i64> {
        Ok(i64::from_be_bytes(self.read_array::<8>()?))
    }

    /// Reads an `f32` from its big-endian bit pattern.
    fn read_f32(&mut self) -> ByteResult<f32> {
        Ok(f32::from_bits(u32::from_be_bytes(self.read_array::<4>()?)))
    }

    /// Reads an `f64` from its big-endian bit pattern.
    fn read_f64(&mut self) -> ByteResult<f64> {
        Ok(f64::from_bits(u64::from_be_bytes(self.read_array::<8>()?)))
    }

    /// Reads a `u16` byte length followed by that many bytes of UTF-8.
    fn read_utf(&mut self) -> ByteResult<String> {
        let len = usize::from(u16::from_be_bytes(self.read_array::<2>()?));
        if let Some(available) = self.remaining() {
            if len > available {
                return Err(ByteError::UnexpectedEof {
                    requested: len,
                    available,
                });
            }
        }
        let mut buf = vec![0u8; len];
        self.read_exact(&mut buf)?;
        String::from_utf8(buf).map_err(|err| ByteError::InvalidUtf8 {
            valid_up_to: err.utf8_error().valid_up_to(),
        })
    }
}

/// A reader over an in-memory byte slice.
///
/// All read operations are bounds-checked and return errors on failure.
/// The reader never panics on malformed input.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a new `ByteReader` from a byte slice.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the number of bytes remaining to read.
    #[must_use]
    pub const fn bytes_remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns `true` if there are no more bytes to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bytes_remaining() == 0
    }

    /// Returns the current byte position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Borrows the next `len` bytes without copying.
    pub fn read_slice(&mut self, len: usize) -> ByteResult<&'a [u8]> {
        let available = self.bytes_remaining();
        if len > available {
            return Err(ByteError::UnexpectedEof {
                requested: len,
                available,
            });
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }
}

impl ByteSource for ByteReader<'_> {
    fn read_exact(&mut self, buf: &mut [u8]) -> ByteResult<()> {
        let slice = self.read_slice(buf.len())?;
        buf.copy_from_slice(slice);
        Ok(())
    }

    fn remaining(&self) -> Option<usize> {
        Some(self.bytes_remaining())
    }
}

/// Adapts any [`std::io::Read`] into a [`ByteSource`].
///
/// A short read at end of stream becomes [`ByteError::UnexpectedEof`];
/// other I/O failures become [`ByteError::Io`].
#[derive(Debug)]
pub struct IoSource<R> {
    inner: R,
    consumed: usize,
}

impl<R: Read> IoSource<R> {
    /// Wraps a reader.
    pub const fn new(inner: R) -> Self {
        Self { inner, consumed: 0 }
    }

    /// Returns the number of bytes consumed so far.
    #[must_use]
    pub const fn bytes_consumed(&self) -> usize {
        self.consumed
    }

    /// Returns the wrapped reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for IoSource<R> {
    fn read_exact(&mut self, buf: &mut [u8]) -> ByteResult<()> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    return Err(ByteError::UnexpectedEof {
                        requested: buf.len(),
                        available: filled,
                    });
                }
                Ok(n) => {
                    filled += n;
                    self.consumed += n;
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => {}
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }
}
