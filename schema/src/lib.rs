//! Type descriptors and the sorted type registry for the graphpack codec.
//!
//! This crate defines which application types the codec can carry:
//! - Type descriptors with ancestry, kind, and declared fields
//! - Derived field schemas (non-static members, sorted by name)
//! - The immutable, name-sorted [`TypeRegistry`] that assigns discriminators
//! - Deterministic registry fingerprinting
//!
//! # Design Principles
//!
//! - **Explicit descriptors** - No reflection on arbitrary Rust types.
//! - **Stable order** - A type's discriminator depends only on the sorted set of names.
//! - **Computed once** - Field schemas are derived at registry construction and cached.

mod descriptor;
mod error;
mod field;
mod hash;
mod registry;

pub use descriptor::{simple_name, TypeDescriptor, TypeKind};
pub use error::{SchemaError, SchemaResult};
pub use field::{FieldDescriptor, FieldType, Primitive};
pub use hash::registry_hash;
pub use registry::{RegisteredType, RegistryBuilder, TypeRegistry};

/// Maximum number of registered types; discriminators are non-negative `i16`s.
pub const MAX_REGISTERED_TYPES: usize = i16::MAX as usize + 1;

/// Element-type name written for arrays whose elements are themselves arrays.
pub const ARRAY_PLACEHOLDER: &str = "object";

/// Runtime type names of the built-in value kinds.
pub const BUILTIN_TYPE_NAMES: [&str; 11] = [
    "Short", "Int", "Long", "Float", "Double", "Char", "Byte", "String", "List", "Map", "Enum",
];

/// Returns `true` if `name` is taken by a built-in kind, a primitive, or the
/// nested-array placeholder.
#[must_use]
pub fn is_reserved_name(name: &str) -> bool {
    name == ARRAY_PLACEHOLDER
        || BUILTIN_TYPE_NAMES.contains(&name)
        || Primitive::from_name(name).is_some()
}
