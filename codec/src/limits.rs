//! Limits for codec-level encoding and decoding.

/// Codec-specific limits enforced on both the write and the read path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecLimits {
    /// Maximum nesting depth of values (the top-level value is depth 1).
    pub max_depth: usize,
    /// Maximum number of elements in a list, map, or array.
    pub max_collection_len: usize,
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            max_depth: 256,
            max_collection_len: 16 * 1024 * 1024,
        }
    }
}

impl CodecLimits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_depth: 16,
            max_collection_len: 1024,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_depth: usize::MAX,
            max_collection_len: usize::MAX,
        }
    }
}
