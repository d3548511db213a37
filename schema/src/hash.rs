//! Deterministic registry fingerprinting.

use blake3::Hasher;

use crate::{FieldType, Primitive, TypeKind, TypeRegistry};

/// Computes a deterministic fingerprint of a registry's wire-relevant shape:
/// discriminator order, type names, kinds, and field schemas.
#[must_use]
pub fn registry_hash(registry: &TypeRegistry) -> u64 {
    let mut hasher = Hasher::new();
    write_len(&mut hasher, registry.len());

    for ty in registry.iter() {
        write_str(&mut hasher, ty.simple_name());
        write_u8(
            &mut hasher,
            match ty.kind() {
                TypeKind::Class => 0,
                TypeKind::Interface => 1,
            },
        );
        write_u8(&mut hasher, u8::from(ty.is_constructible()));
        write_len(&mut hasher, ty.fields().len());

        for field in ty.fields() {
            write_str(&mut hasher, &field.name);
            write_field_type(&mut hasher, &field.ty);
        }
    }

    let hash = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[0..8]);
    u64::from_le_bytes(bytes)
}

fn write_field_type(hasher: &mut Hasher, ty: &FieldType) {
    match ty {
        FieldType::Primitive(primitive) => {
            write_u8(hasher, 0);
            write_u8(hasher, primitive_code(*primitive));
        }
        FieldType::String => write_u8(hasher, 1),
        FieldType::List => write_u8(hasher, 2),
        FieldType::Map => write_u8(hasher, 3),
        FieldType::Array => write_u8(hasher, 4),
        FieldType::Enum(name) => {
            write_u8(hasher, 5);
            write_str(hasher, name);
        }
        FieldType::Composite(name) => {
            write_u8(hasher, 6);
            write_str(hasher, name);
        }
        FieldType::Any => write_u8(hasher, 7),
    }
}

const fn primitive_code(primitive: Primitive) -> u8 {
    match primitive {
        Primitive::Short => 0,
        Primitive::Int => 1,
        Primitive::Long => 2,
        Primitive::Float => 3,
        Primitive::Double => 4,
        Primitive::Char => 5,
        Primitive::Byte => 6,
    }
}

fn write_u8(hasher: &mut Hasher, value: u8) {
    hasher.update(&[value]);
}

fn write_len(hasher: &mut Hasher, value: usize) {
    hasher.update(&(value as u64).to_le_bytes());
}

fn write_str(hasher: &mut Hasher, value: &str) {
    write_len(hasher, value.len());
    hasher.update(value.as_bytes());
}
