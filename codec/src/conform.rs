//! Checks values against declared field types.

use std::iter;

use schema::{simple_name, FieldDescriptor, FieldType, Primitive, TypeDescriptor, TypeRegistry};

use crate::error::{CodecError, CodecResult, TypeRef};
use crate::value::Value;

/// Fails with [`CodecError::TypeMismatch`] when `value` cannot be stored in
/// `field`.
///
/// A composite field accepts objects of the named type or of any type that
/// has it as an ancestor. `Any` accepts everything.
pub(crate) fn check_field_value(
    registry: &TypeRegistry,
    field: &FieldDescriptor,
    value: &Value,
) -> CodecResult<()> {
    let conforms = match (&field.ty, value) {
        (FieldType::Any, _)
        | (FieldType::String, Value::String(_))
        | (FieldType::List, Value::List(_))
        | (FieldType::Map, Value::Map(_))
        | (FieldType::Array, Value::Array(_))
        | (FieldType::Enum(_), Value::Enum(_)) => true,
        (FieldType::Primitive(primitive), _) => primitive_kind(*primitive) == value.kind_name(),
        (FieldType::Composite(name), Value::Object(object)) => {
            let ty = registry.get(object.type_name()).ok_or_else(|| {
                CodecError::UnknownType(TypeRef::Name(object.type_name().to_string()))
            })?;
            is_assignable(ty.descriptor(), name)
        }
        _ => false,
    };

    if conforms {
        return Ok(());
    }
    let found = match value {
        Value::Object(object) => object.type_name(),
        other => other.kind_name(),
    };
    Err(CodecError::mismatch(&expected_name(&field.ty), found))
}

fn is_assignable(ty: &TypeDescriptor, target: &str) -> bool {
    let target = simple_name(target);
    iter::once(ty)
        .chain(ty.ancestors())
        .any(|candidate| candidate.simple_name() == target)
}

const fn primitive_kind(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::Short => "Short",
        Primitive::Int => "Int",
        Primitive::Long => "Long",
        Primitive::Float => "Float",
        Primitive::Double => "Double",
        Primitive::Char => "Char",
        Primitive::Byte => "Byte",
    }
}

fn expected_name(ty: &FieldType) -> String {
    match ty {
        FieldType::Primitive(primitive) => primitive_kind(*primitive).to_string(),
        FieldType::String => "String".to_string(),
        FieldType::List => "List".to_string(),
        FieldType::Map => "Map".to_string(),
        FieldType::Array => "Array".to_string(),
        FieldType::Enum(name) | FieldType::Composite(name) => name.clone(),
        FieldType::Any => "Any".to_string(),
    }
}
