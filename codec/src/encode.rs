//! Recursive writer.

use bytestream::ByteSink;
use schema::{RegisteredType, TypeKind, TypeRegistry, ARRAY_PLACEHOLDER};

use crate::conform::check_field_value;
use crate::error::{CodecError, CodecResult, LimitKind, TypeRef};
use crate::limits::CodecLimits;
use crate::tag::Tag;
use crate::value::{ArrayValue, ElementType, Object, Value};

/// Walks a value tree and writes it to a sink.
pub(crate) struct Encoder<'a, S> {
    registry: &'a TypeRegistry,
    limits: &'a CodecLimits,
    sink: &'a mut S,
    depth: usize,
}

impl<'a, S: ByteSink> Encoder<'a, S> {
    pub(crate) fn new(registry: &'a TypeRegistry, limits: &'a CodecLimits, sink: &'a mut S) -> Self {
        Self {
            registry,
            limits,
            sink,
            depth: 0,
        }
    }

    pub(crate) fn write_value(&mut self, value: &Value) -> CodecResult<()> {
        self.depth += 1;
        if self.depth > self.limits.max_depth {
            return Err(CodecError::LimitsExceeded {
                kind: LimitKind::Depth,
                limit: self.limits.max_depth,
                actual: self.depth,
            });
        }

        let tag = self.classify(value)?;
        self.sink.write_i16(tag.raw())?;

        match value {
            Value::Short(v) => self.sink.write_i16(*v)?,
            Value::Int(v) => self.sink.write_i32(*v)?,
            Value::Long(v) => self.sink.write_i64(*v)?,
            Value::Float(v) => self.sink.write_f32(*v)?,
            Value::Double(v) => self.sink.write_f64(*v)?,
            Value::String(v) => self.sink.write_utf(v)?,
            Value::Char(v) => self.sink.write_utf(v.encode_utf8(&mut [0u8; 4]))?,
            Value::Byte(v) => self.sink.write_i8(*v)?,
            Value::Enum(ordinal) => self.sink.write_i32(*ordinal)?,
            Value::List(items) => {
                let count = self.count(items.len())?;
                self.sink.write_i64(count)?;
                for item in items {
                    self.write_value(item)?;
                }
            }
            Value::Map(entries) => {
                let count = self.count(entries.len())?;
                self.sink.write_i64(count)?;
                for (key, value) in entries {
                    self.write_value(key)?;
                    self.write_value(value)?;
                }
            }
            Value::Array(array) => self.write_array(array)?,
            Value::Object(object) => {
                if let Tag::Composite(discriminator) = tag {
                    let ty = self.registry.type_of(discriminator)?;
                    self.write_fields(ty, object)?;
                }
            }
        }

        self.depth -= 1;
        Ok(())
    }

    /// Resolves the tag, and for objects checks the field set against the
    /// schema before anything of the object is written.
    ///
    /// Objects must carry the registered name exactly, since the decoder
    /// restores that name.
    fn classify(&self, value: &Value) -> CodecResult<Tag> {
        let tag = match value {
            Value::Short(_) => Tag::Short,
            Value::Int(_) => Tag::Int,
            Value::Long(_) => Tag::Long,
            Value::Float(_) => Tag::Float,
            Value::Double(_) => Tag::Double,
            Value::String(_) => Tag::String,
            Value::Char(_) => Tag::Char,
            Value::Byte(_) => Tag::Byte,
            Value::List(_) => Tag::List,
            Value::Map(_) => Tag::Map,
            Value::Array(_) => Tag::Array,
            Value::Enum(_) => Tag::Enum,
            Value::Object(object) => {
                let ty = self
                    .registry
                    .get(object.type_name())
                    .filter(|ty| ty.name() == object.type_name())
                    .ok_or_else(|| CodecError::UnknownType(TypeRef::Name(object.type_name().to_string())))?;
                check_fields(self.registry, ty, object)?;
                Tag::Composite(ty.discriminator())
            }
        };
        Ok(tag)
    }

    fn write_array(&mut self, array: &ArrayValue) -> CodecResult<()> {
        let len = i32::try_from(array.items.len()).map_err(|_| CodecError::LimitsExceeded {
            kind: LimitKind::CollectionLength,
            limit: i32::MAX as usize,
            actual: array.items.len(),
        })?;
        self.check_len(array.items.len())?;
        self.sink.write_i32(len)?;

        let Some(first) = array.items.first() else {
            return Ok(());
        };
        let element_name = match &array.element_type {
            Some(ElementType::Primitive(primitive)) => primitive.name(),
            Some(ElementType::Interface(name)) => {
                self.check_interface(name)?;
                name.as_str()
            }
            Some(ElementType::Array) => ARRAY_PLACEHOLDER,
            Some(ElementType::Class(_)) | None => first.type_name(),
        };
        self.sink.write_utf(element_name)?;

        for item in &array.items {
            self.write_value(item)?;
        }
        Ok(())
    }

    fn write_fields(&mut self, ty: &RegisteredType, object: &Object) -> CodecResult<()> {
        for field in ty.fields() {
            let value = object.get(&field.name).ok_or_else(|| CodecError::NullValue {
                type_name: ty.name().to_string(),
                field: field.name.clone(),
            })?;
            self.write_value(value)?;
        }
        Ok(())
    }

    /// Interface element names must resolve on the read path.
    fn check_interface(&self, name: &str) -> CodecResult<()> {
        match self.registry.get(name) {
            Some(ty) if ty.kind() == TypeKind::Interface => Ok(()),
            _ => Err(CodecError::UnknownType(TypeRef::Name(name.to_string()))),
        }
    }

    fn count(&self, len: usize) -> CodecResult<i64> {
        self.check_len(len)?;
        i64::try_from(len).map_err(|_| CodecError::LimitsExceeded {
            kind: LimitKind::CollectionLength,
            limit: i64::MAX as usize,
            actual: len,
        })
    }

    fn check_len(&self, len: usize) -> CodecResult<()> {
        if len > self.limits.max_collection_len {
            return Err(CodecError::LimitsExceeded {
                kind: LimitKind::CollectionLength,
                limit: self.limits.max_collection_len,
                actual: len,
            });
        }
        Ok(())
    }
}

fn check_fields(registry: &TypeRegistry, ty: &RegisteredType, object: &Object) -> CodecResult<()> {
    for (name, _) in object.fields() {
        if !ty.fields().iter().any(|field| field.name == name) {
            return Err(CodecError::UnknownField {
                type_name: ty.name().to_string(),
                field: name.to_string(),
            });
        }
    }
    for field in ty.fields() {
        let value = object.get(&field.name).ok_or_else(|| CodecError::NullValue {
            type_name: ty.name().to_string(),
            field: field.name.clone(),
        })?;
        check_field_value(registry, field, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::{FieldDescriptor, FieldType, Primitive, TypeDescriptor};

    fn registry() -> TypeRegistry {
        TypeRegistry::new(vec![
            TypeDescriptor::class("Point")
                .serializable()
                .field(FieldDescriptor::new("y", FieldType::INT))
                .field(FieldDescriptor::new("x", FieldType::INT)),
            TypeDescriptor::interface("Shape").serializable(),
            TypeDescriptor::class("geo::Line")
                .serializable()
                .field(FieldDescriptor::new("start", FieldType::composite("Point"))),
        ])
        .unwrap()
    }

    fn encode(value: &Value) -> CodecResult<Vec<u8>> {
        let registry = registry();
        let limits = CodecLimits::for_testing();
        let mut out = Vec::new();
        Encoder::new(&registry, &limits, &mut out).write_value(value)?;
        Ok(out)
    }

    #[test]
    fn int_layout() {
        assert_eq!(
            encode(&Value::Int(3)).unwrap(),
            vec![0xFF, 0xFE, 0x00, 0x00, 0x00, 0x03]
        );
    }

    #[test]
    fn char_is_one_char_string() {
        assert_eq!(
            encode(&Value::Char('é')).unwrap(),
            vec![0xFF, 0xF9, 0x00, 0x02, 0xC3, 0xA9]
        );
    }

    #[test]
    fn empty_list_is_count_zero() {
        assert_eq!(
            encode(&Value::List(Vec::new())).unwrap(),
            vec![0xFF, 0xF8, 0, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn empty_array_has_no_element_name() {
        let bytes = encode(&Value::Array(ArrayValue::of(Primitive::Int, Vec::<i32>::new()))).unwrap();
        assert_eq!(bytes, vec![0xFF, 0xF6, 0, 0, 0, 0]);
    }

    #[test]
    fn primitive_array_names_primitive() {
        let bytes = encode(&Value::Array(ArrayValue::of(Primitive::Byte, [1i8]))).unwrap();
        assert_eq!(
            bytes,
            vec![0xFF, 0xF6, 0, 0, 0, 1, 0, 4, b'b', b'y', b't', b'e', 0xFF, 0xF5, 0x01]
        );
    }

    #[test]
    fn class_array_names_first_element() {
        let array = ArrayValue::new(
            ElementType::Class("Whatever".to_string()),
            vec![Value::String("a".to_string())],
        );
        let bytes = encode(&Value::Array(array)).unwrap();
        assert_eq!(&bytes[6..14], &[0, 6, b'S', b't', b'r', b'i', b'n', b'g']);
    }

    #[test]
    fn nested_arrays_use_placeholder() {
        let inner = ArrayValue::of(Primitive::Int, [1]);
        let outer = ArrayValue::new(ElementType::Array, vec![Value::Array(inner)]);
        let bytes = encode(&Value::Array(outer)).unwrap();
        assert_eq!(&bytes[6..14], &[0, 6, b'o', b'b', b'j', b'e', b'c', b't']);
    }

    #[test]
    fn unregistered_interface_rejected() {
        let array = ArrayValue::new(
            ElementType::Interface("Drawable".to_string()),
            vec![Value::Int(1)],
        );
        let err = encode(&Value::Array(array)).unwrap_err();
        assert_eq!(err, CodecError::UnknownType(TypeRef::Name("Drawable".to_string())));
    }

    #[test]
    fn registered_interface_accepted() {
        let array = ArrayValue::new(
            ElementType::Interface("Shape".to_string()),
            vec![Value::Int(1)],
        );
        assert!(encode(&Value::Array(array)).is_ok());
    }

    #[test]
    fn object_fields_in_name_order() {
        let point = Object::new("Point").with("y", 4).with("x", 3);
        assert_eq!(
            encode(&Value::Object(point)).unwrap(),
            vec![0x00, 0x01, 0xFF, 0xFE, 0, 0, 0, 3, 0xFF, 0xFE, 0, 0, 0, 4]
        );
    }

    #[test]
    fn unregistered_object_rejected() {
        let err = encode(&Value::Object(Object::new("Ghost"))).unwrap_err();
        assert_eq!(err, CodecError::UnknownType(TypeRef::Name("Ghost".to_string())));
    }

    #[test]
    fn missing_field_is_null() {
        let err = encode(&Value::Object(Object::new("Point").with("x", 1))).unwrap_err();
        assert_eq!(
            err,
            CodecError::NullValue {
                type_name: "Point".to_string(),
                field: "y".to_string()
            }
        );
    }

    #[test]
    fn extra_field_rejected() {
        let point = Object::new("Point").with("x", 1).with("y", 2).with("z", 3);
        let err = encode(&Value::Object(point)).unwrap_err();
        assert!(matches!(err, CodecError::UnknownField { .. }));
    }

    #[test]
    fn depth_limit_enforced() {
        let mut value = Value::Int(0);
        for _ in 0..CodecLimits::for_testing().max_depth {
            value = Value::List(vec![value]);
        }
        let err = encode(&value).unwrap_err();
        assert!(matches!(
            err,
            CodecError::LimitsExceeded {
                kind: LimitKind::Depth,
                ..
            }
        ));
    }

    #[test]
    fn collection_limit_enforced() {
        let value = Value::List(vec![Value::Byte(0); CodecLimits::for_testing().max_collection_len + 1]);
        let err = encode(&value).unwrap_err();
        assert!(matches!(
            err,
            CodecError::LimitsExceeded {
                kind: LimitKind::CollectionLength,
                ..
            }
        ));
    }

    #[test]
    fn field_value_must_match_declared_type() {
        let point = Object::new("Point").with("x", "not an int").with("y", 2);
        let mut out = Vec::new();
        let registry = registry();
        let limits = CodecLimits::for_testing();
        let err = Encoder::new(&registry, &limits, &mut out)
            .write_value(&Value::Object(point))
            .unwrap_err();
        assert_eq!(err, CodecError::mismatch("Int", "String"));
        assert!(out.is_empty());
    }

    #[test]
    fn composite_field_rejects_other_type() {
        let origin = Object::new("Point").with("x", 0).with("y", 0);
        let inner = Object::new("geo::Line").with("start", origin);
        let line = Object::new("geo::Line").with("start", inner);
        let err = encode(&Value::Object(line)).unwrap_err();
        assert_eq!(err, CodecError::mismatch("Point", "geo::Line"));
    }

    #[test]
    fn composite_field_accepts_declared_type() {
        let start = Object::new("Point").with("x", 1).with("y", 2);
        let line = Object::new("geo::Line").with("start", start);
        assert!(encode(&Value::Object(line)).is_ok());
    }

    #[test]
    fn simple_name_of_qualified_type_rejected() {
        let start = Object::new("Point").with("x", 1).with("y", 2);
        let line = Object::new("Line").with("start", start);
        let err = encode(&Value::Object(line)).unwrap_err();
        assert_eq!(err, CodecError::UnknownType(TypeRef::Name("Line".to_string())));
    }
}
