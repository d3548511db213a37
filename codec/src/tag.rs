//! Wire discriminators.

use crate::error::{CodecError, CodecResult, MalformedReason};

/// The discriminator written in front of every value.
///
/// Built-in kinds use a fixed negative table; composites use their
/// non-negative registry index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
    Char,
    List,
    Map,
    Array,
    Byte,
    Enum,
    Composite(u16),
}

impl Tag {
    /// Returns the raw 16-bit discriminator.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)] // registry indices never exceed i16::MAX
    pub const fn raw(self) -> i16 {
        match self {
            Self::Short => -1,
            Self::Int => -2,
            Self::Long => -3,
            Self::Float => -4,
            Self::Double => -5,
            Self::String => -6,
            Self::Char => -7,
            Self::List => -8,
            Self::Map => -9,
            Self::Array => -10,
            Self::Byte => -11,
            Self::Enum => -12,
            Self::Composite(index) => index as i16,
        }
    }

    /// Parses a raw discriminator.
    pub fn from_raw(raw: i16) -> CodecResult<Self> {
        let tag = match raw {
            -1 => Self::Short,
            -2 => Self::Int,
            -3 => Self::Long,
            -4 => Self::Float,
            -5 => Self::Double,
            -6 => Self::String,
            -7 => Self::Char,
            -8 => Self::List,
            -9 => Self::Map,
            -10 => Self::Array,
            -11 => Self::Byte,
            -12 => Self::Enum,
            index if index >= 0 => Self::Composite(index.unsigned_abs()),
            tag => return Err(CodecError::Malformed(MalformedReason::UnknownTag { tag })),
        };
        Ok(tag)
    }
}
