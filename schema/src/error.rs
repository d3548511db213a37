//! Registry validation errors.

use std::fmt;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur when building or querying a type registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Neither the type nor any ancestor carries the serializable marker.
    InvalidRegistryEntry { name: String },

    /// Two registered types share a simple name, so their order is ambiguous.
    DuplicateTypeName { name: String },

    /// A registered type's simple name collides with a built-in kind.
    ReservedTypeName { name: String },

    /// Two non-static fields share a name across a type's ancestor chain.
    DuplicateFieldName { type_name: String, field: String },

    /// More types than the 16-bit discriminator can address.
    TooManyTypes { count: usize, max: usize },

    /// No registered type has this name.
    UnknownTypeName { name: String },

    /// No registered type sits at this discriminator.
    UnknownDiscriminator { discriminator: u16, registered: usize },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRegistryEntry { name } => {
                write!(f, "type {name} is not marked serializable")
            }
            Self::DuplicateTypeName { name } => {
                write!(f, "type name {name} is registered more than once")
            }
            Self::ReservedTypeName { name } => {
                write!(f, "type name {name} is reserved for a built-in kind")
            }
            Self::DuplicateFieldName { type_name, field } => {
                write!(f, "field {field} appears more than once in {type_name}")
            }
            Self::TooManyTypes { count, max } => {
                write!(f, "{count} types registered, at most {max} are addressable")
            }
            Self::UnknownTypeName { name } => write!(f, "type {name} is not registered"),
            Self::UnknownDiscriminator {
                discriminator,
                registered,
            } => {
                write!(
                    f,
                    "discriminator {discriminator} out of range for {registered} registered types"
                )
            }
        }
    }
}

impl std::error::Error for SchemaError {}
