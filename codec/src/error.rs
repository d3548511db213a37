//! Error types for codec operations.

use std::fmt;

use bytestream::ByteError;
use schema::SchemaError;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while building a codec or encoding/decoding values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The type list was rejected at construction time.
    Registry(SchemaError),

    /// A value's type, a decoded discriminator, or an array element-type
    /// name is not in the registry.
    UnknownType(TypeRef),

    /// The registered type has no zero-argument construction path.
    NotConstructible { type_name: String },

    /// The stream is structurally broken.
    Malformed(MalformedReason),

    /// Decoding into an enum-typed field is not implemented.
    EnumDecodingUnsupported { type_name: String, field: String },

    /// A composite object has no value for a field of its schema.
    NullValue { type_name: String, field: String },

    /// A composite object carries a field its schema does not declare.
    UnknownField { type_name: String, field: String },

    /// A value had a different kind than the caller expected.
    TypeMismatch { expected: String, found: String },

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },

    /// The underlying sink or source failed.
    Io(ByteError),
}

/// Identifies a type that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Name(String),
    Discriminator(u16),
}

/// Details for malformed stream errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    Truncated { requested: usize, available: usize },
    InvalidUtf8 { valid_up_to: usize },
    UnknownTag { tag: i16 },
    NegativeLength { length: i64 },
    EmptyChar,
    TrailingBytes { remaining: usize },
}

/// Specific limit that was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    Depth,
    CollectionLength,
}

impl CodecError {
    pub(crate) fn mismatch(expected: &str, found: &str) -> Self {
        Self::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registry(e) => write!(f, "invalid registry: {e}"),
            Self::UnknownType(type_ref) => write!(f, "unknown type {type_ref}"),
            Self::NotConstructible { type_name } => {
                write!(f, "type {type_name} cannot be constructed for decoding")
            }
            Self::Malformed(reason) => write!(f, "malformed stream: {reason}"),
            Self::EnumDecodingUnsupported { type_name, field } => {
                write!(
                    f,
                    "decoding enum field {type_name}.{field} is not supported"
                )
            }
            Self::NullValue { type_name, field } => {
                write!(f, "field {type_name}.{field} has no value")
            }
            Self::UnknownField { type_name, field } => {
                write!(f, "field {field} is not declared by {type_name}")
            }
            Self::TypeMismatch { expected, found } => {
                write!(f, "expected {expected} but got {found}")
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
            Self::Io(e) => write!(f, "i/o error: {e}"),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name}"),
            Self::Discriminator(discriminator) => write!(f, "#{discriminator}"),
        }
    }
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated {
                requested,
                available,
            } => {
                write!(f, "need {requested} bytes, have {available}")
            }
            Self::InvalidUtf8 { valid_up_to } => {
                write!(f, "invalid utf-8 after {valid_up_to} bytes")
            }
            Self::UnknownTag { tag } => write!(f, "unknown tag {tag}"),
            Self::NegativeLength { length } => write!(f, "negative length {length}"),
            Self::EmptyChar => write!(f, "empty string for char value"),
            Self::TrailingBytes { remaining } => {
                write!(f, "{remaining} trailing bytes after value")
            }
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Depth => "nesting depth",
            Self::CollectionLength => "collection length",
        };
        write!(f, "{name}")
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Registry(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ByteError> for CodecError {
    fn from(err: ByteError) -> Self {
        match err {
            ByteError::UnexpectedEof {
                requested,
                available,
            } => Self::Malformed(MalformedReason::Truncated {
                requested,
                available,
            }),
            ByteError::InvalidUtf8 { valid_up_to } => {
                Self::Malformed(MalformedReason::InvalidUtf8 { valid_up_to })
            }
            other => Self::Io(other),
        }
    }
}

impl From<SchemaError> for CodecError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::UnknownTypeName { name } => Self::UnknownType(TypeRef::Name(name)),
            SchemaError::UnknownDiscriminator { discriminator, .. } => {
                Self::UnknownType(TypeRef::Discriminator(discriminator))
            }
            other => Self::Registry(other),
        }
    }
}
