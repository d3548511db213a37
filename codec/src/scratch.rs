//! Reusable scratch buffers for codec operations.

/// Output buffer reused across encodes.
#[derive(Debug, Default)]
pub struct CodecScratch {
    buf: Vec<u8>,
}

impl CodecScratch {
    /// Creates a new scratch buffer with no pre-allocated capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scratch buffer with room for `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Current capacity of the underlying buffer.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    pub(crate) fn cleared(&mut self) -> &mut Vec<u8> {
        self.buf.clear();
        &mut self.buf
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.buf
    }
}
