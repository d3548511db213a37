//! Error types for byte stream operations.

use std::fmt;
use std::io;

/// Result type for byte stream operations.
pub type ByteResult<T> = Result<T, ByteError>;

/// Errors that can occur while writing to a sink or reading from a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ByteError {
    /// Attempted to read past the end of the source.
    UnexpectedEof {
        /// Number of bytes requested.
        requested: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// A length-prefixed string did not contain valid UTF-8.
    InvalidUtf8 {
        /// Byte offset of the first invalid sequence within the string.
        valid_up_to: usize,
    },

    /// A string is too long for its 16-bit length prefix.
    StringTooLong {
        /// Encoded length in bytes.
        len: usize,
        /// Maximum encodable length in bytes.
        max: usize,
    },

    /// The underlying reader or writer failed.
    Io {
        /// Kind reported by the I/O layer.
        kind: io::ErrorKind,
        /// Rendered message of the original error.
        message: String,
    },
}

impl ByteError {
    /// Returns `true` if the error describes a structurally broken stream
    /// rather than a failure of the underlying device.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::UnexpectedEof { .. } | Self::InvalidUtf8 { .. })
    }
}

impl fmt::Display for ByteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof {
                requested,
                available,
            } => {
                write!(
                    f,
                    "attempted to read {requested} bytes but only {available} bytes available"
                )
            }
            Self::InvalidUtf8 { valid_up_to } => {
                write!(f, "invalid utf-8 in string after {valid_up_to} bytes")
            }
            Self::StringTooLong { len, max } => {
                write!(f, "string of {len} bytes exceeds length prefix maximum {max}")
            }
            Self::Io { kind, message } => write!(f, "i/o failure ({kind:?}): {message}"),
        }
    }
}

impl std::error::Error for ByteError {}

impl From<io::Error> for ByteError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_unexpected_eof() {
        let err = ByteError::UnexpectedEof {
            requested: 8,
            available: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("8 bytes"), "should mention requested bytes");
        assert!(msg.contains("3 bytes"), "should mention available bytes");
        assert!(msg.contains("read"), "should mention read operation");
    }

    #[test]
    fn error_display_string_too_long() {
        let err = ByteError::StringTooLong {
            len: 70_000,
            max: 65_535,
        };
        let msg = err.to_string();
        assert!(msg.contains("70000"), "should mention length");
        assert!(msg.contains("65535"), "should mention maximum");
    }

    #[test]
    fn error_display_invalid_utf8() {
        let err = ByteError::InvalidUtf8 { valid_up_to: 2 };
        assert!(err.to_string().contains("utf-8"));
    }

    #[test]
    fn malformed_classification() {
        assert!(ByteError::UnexpectedEof {
            requested: 1,
            available: 0
        }
        .is_malformed());
        assert!(ByteError::InvalidUtf8 { valid_up_to: 0 }.is_malformed());
        assert!(!ByteError::StringTooLong { len: 1, max: 0 }.is_malformed());
        let io_err: ByteError = io::Error::new(io::ErrorKind::BrokenPipe, "closed").into();
        assert!(!io_err.is_malformed());
    }

    #[test]
    fn error_from_io_keeps_kind() {
        let err: ByteError = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed").into();
        match err {
            ByteError::Io { kind, message } => {
                assert_eq!(kind, io::ErrorKind::BrokenPipe);
                assert!(message.contains("pipe closed"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn error_equality() {
        let err1 = ByteError::UnexpectedEof {
            requested: 8,
            available: 3,
        };
        let err2 = ByteError::UnexpectedEof {
            requested: 8,
            available: 3,
        };
        let err3 = ByteError::UnexpectedEof {
            requested: 8,
            available: 4,
        };
        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }

    #[test]
    fn error_is_std_error() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<ByteError>();
    }
}
