//! Recursive reader.

use bytestream::ByteSource;
use schema::{Primitive, TypeKind, TypeRegistry, ARRAY_PLACEHOLDER, BUILTIN_TYPE_NAMES};

use crate::conform::check_field_value;
use crate::error::{CodecError, CodecResult, LimitKind, MalformedReason, TypeRef};
use crate::limits::CodecLimits;
use crate::tag::Tag;
use crate::value::{ArrayValue, ElementType, Object, Value};

/// Every encoded value starts with a 16-bit discriminator.
const MIN_VALUE_BYTES: usize = 2;

/// Upper bound on slots reserved up front when the source size is unknown.
const MAX_BLIND_PREALLOC: usize = 1024;

/// Reads one value tree from a source, mirroring [`Encoder`](crate::encode::Encoder).
pub(crate) struct Decoder<'a, S> {
    registry: &'a TypeRegistry,
    limits: &'a CodecLimits,
    source: &'a mut S,
    depth: usize,
}

impl<'a, S: ByteSource> Decoder<'a, S> {
    pub(crate) fn new(
        registry: &'a TypeRegistry,
        limits: &'a CodecLimits,
        source: &'a mut S,
    ) -> Self {
        Self {
            registry,
            limits,
            source,
            depth: 0,
        }
    }

    pub(crate) fn read_value(&mut self) -> CodecResult<Value> {
        self.depth += 1;
        if self.depth > self.limits.max_depth {
            return Err(CodecError::LimitsExceeded {
                kind: LimitKind::Depth,
                limit: self.limits.max_depth,
                actual: self.depth,
            });
        }

        let tag = Tag::from_raw(self.source.read_i16()?)?;
        let value = match tag {
            Tag::Short => Value::Short(self.source.read_i16()?),
            Tag::Int => Value::Int(self.source.read_i32()?),
            Tag::Long => Value::Long(self.source.read_i64()?),
            Tag::Float => Value::Float(self.source.read_f32()?),
            Tag::Double => Value::Double(self.source.read_f64()?),
            Tag::String => Value::String(self.source.read_utf()?),
            Tag::Char => {
                let text = self.source.read_utf()?;
                let ch = text
                    .chars()
                    .next()
                    .ok_or(CodecError::Malformed(MalformedReason::EmptyChar))?;
                Value::Char(ch)
            }
            Tag::Byte => Value::Byte(self.source.read_i8()?),
            Tag::Enum => Value::Enum(self.source.read_i32()?),
            Tag::List => {
                let raw = self.source.read_i64()?;
                let count = self.count(raw, 1)?;
                let mut items = Vec::with_capacity(self.initial_capacity(count));
                for _ in 0..count {
                    items.push(self.read_value()?);
                }
                Value::List(items)
            }
            Tag::Map => {
                let raw = self.source.read_i64()?;
                let count = self.count(raw, 2)?;
                let mut entries = Vec::with_capacity(self.initial_capacity(count));
                for _ in 0..count {
                    let key = self.read_value()?;
                    let value = self.read_value()?;
                    entries.push((key, value));
                }
                Value::Map(entries)
            }
            Tag::Array => Value::Array(self.read_array()?),
            Tag::Composite(discriminator) => Value::Object(self.read_object(discriminator)?),
        };

        self.depth -= 1;
        Ok(value)
    }

    fn read_array(&mut self) -> CodecResult<ArrayValue> {
        let raw = self.source.read_i32()?;
        let len = self.count(i64::from(raw), 1)?;
        if len == 0 {
            return Ok(ArrayValue::empty());
        }

        let element_name = self.source.read_utf()?;
        let element_type = self.resolve_element_type(element_name)?;
        let mut items = Vec::with_capacity(self.initial_capacity(len));
        for _ in 0..len {
            items.push(self.read_value()?);
        }
        Ok(ArrayValue::new(element_type, items))
    }

    fn read_object(&mut self, discriminator: u16) -> CodecResult<Object> {
        let registry = self.registry;
        let ty = registry.type_of(discriminator)?;
        if !ty.is_constructible() {
            return Err(CodecError::NotConstructible {
                type_name: ty.name().to_string(),
            });
        }
        tracing::trace!(
            type_name = ty.name(),
            discriminator,
            fields = ty.fields().len(),
            "decoding composite"
        );

        let mut object = Object::new(ty.name());
        for field in ty.fields() {
            if field.ty.is_enum() {
                return Err(CodecError::EnumDecodingUnsupported {
                    type_name: ty.name().to_string(),
                    field: field.name.clone(),
                });
            }
            let value = self.read_value()?;
            check_field_value(registry, field, &value)?;
            object.set(field.name.clone(), value);
        }
        Ok(object)
    }

    fn resolve_element_type(&self, name: String) -> CodecResult<ElementType> {
        if let Some(primitive) = Primitive::from_name(&name) {
            return Ok(ElementType::Primitive(primitive));
        }
        if name == ARRAY_PLACEHOLDER {
            return Ok(ElementType::Array);
        }
        if BUILTIN_TYPE_NAMES.contains(&name.as_str()) {
            return Ok(ElementType::Class(name));
        }
        match self.registry.get(&name) {
            Some(ty) if ty.kind() == TypeKind::Interface => Ok(ElementType::Interface(name)),
            Some(_) => Ok(ElementType::Class(name)),
            None => Err(CodecError::UnknownType(TypeRef::Name(name))),
        }
    }

    /// A sized source has already bounded `count`; otherwise the stream may
    /// end long before `count` values arrive.
    fn initial_capacity(&self, count: usize) -> usize {
        if self.source.remaining().is_some() {
            count
        } else {
            count.min(MAX_BLIND_PREALLOC)
        }
    }

    /// Validates a count read from the stream before anything is allocated.
    fn count(&self, raw: i64, values_per_entry: usize) -> CodecResult<usize> {
        if raw < 0 {
            return Err(CodecError::Malformed(MalformedReason::NegativeLength {
                length: raw,
            }));
        }
        let count = usize::try_from(raw).unwrap_or(usize::MAX);
        if count > self.limits.max_collection_len {
            return Err(CodecError::LimitsExceeded {
                kind: LimitKind::CollectionLength,
                limit: self.limits.max_collection_len,
                actual: count,
            });
        }
        if let Some(available) = self.source.remaining() {
            let needed = count.saturating_mul(values_per_entry * MIN_VALUE_BYTES);
            if needed > available {
                return Err(CodecError::Malformed(MalformedReason::Truncated {
                    requested: needed,
                    available,
                }));
            }
        }
        Ok(count)
    }
}
