//! Conversions between Rust values and [`Value`], plus the bridge for
//! user types that map onto registered composites.

use schema::TypeDescriptor;

use crate::error::{CodecError, CodecResult};
use crate::value::{ArrayValue, Object, Value};

macro_rules! scalar_conversions {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }

            impl TryFrom<Value> for $ty {
                type Error = CodecError;

                fn try_from(value: Value) -> CodecResult<Self> {
                    match value {
                        Value::$variant(inner) => Ok(inner),
                        other => Err(CodecError::mismatch(stringify!($variant), other.kind_name())),
                    }
                }
            }
        )*
    };
}

scalar_conversions! {
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    char => Char,
    i8 => Byte,
    String => String,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl TryFrom<Value> for Vec<Value> {
    type Error = CodecError;

    fn try_from(value: Value) -> CodecResult<Self> {
        match value {
            Value::List(items) => Ok(items),
            other => Err(CodecError::mismatch("List", other.kind_name())),
        }
    }
}

impl TryFrom<Value> for ArrayValue {
    type Error = CodecError;

    fn try_from(value: Value) -> CodecResult<Self> {
        match value {
            Value::Array(array) => Ok(array),
            other => Err(CodecError::mismatch("Array", other.kind_name())),
        }
    }
}

impl TryFrom<Value> for Object {
    type Error = CodecError;

    fn try_from(value: Value) -> CodecResult<Self> {
        match value {
            Value::Object(object) => Ok(object),
            other => Err(CodecError::mismatch("Object", other.kind_name())),
        }
    }
}

impl Object {
    /// Removes a field and converts it.
    ///
    /// A missing field is reported as [`CodecError::NullValue`].
    pub fn field<T>(&mut self, name: &str) -> CodecResult<T>
    where
        T: TryFrom<Value, Error = CodecError>,
    {
        let value = self.take(name).ok_or_else(|| CodecError::NullValue {
            type_name: self.type_name().to_string(),
            field: name.to_string(),
        })?;
        T::try_from(value)
    }
}

/// A Rust type that maps onto a registered composite.
///
/// ```
/// use codec::{Codec, CodecResult, Composite, Object};
/// use schema::{FieldDescriptor, FieldType, TypeDescriptor};
///
/// #[derive(Debug, PartialEq)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Composite for Point {
///     fn descriptor() -> TypeDescriptor {
///         TypeDescriptor::class("Point")
///             .serializable()
///             .field(FieldDescriptor::new("x", FieldType::INT))
///             .field(FieldDescriptor::new("y", FieldType::INT))
///     }
///
///     fn to_object(&self) -> Object {
///         Object::new("Point").with("x", self.x).with("y", self.y)
///     }
///
///     fn from_object(mut object: Object) -> CodecResult<Self> {
///         Ok(Self {
///             x: object.field("x")?,
///             y: object.field("y")?,
///         })
///     }
/// }
///
/// let codec = Codec::new(vec![Point::descriptor()]).unwrap();
/// let bytes = codec.encode_composite(&Point { x: 3, y: 4 }).unwrap();
/// assert_eq!(codec.decode_composite::<Point>(&bytes).unwrap(), Point { x: 3, y: 4 });
/// ```
pub trait Composite: Sized {
    /// The registry entry for this type.
    fn descriptor() -> TypeDescriptor;

    /// Captures the current field values.
    fn to_object(&self) -> Object;

    /// Rebuilds the value from decoded fields.
    fn from_object(object: Object) -> CodecResult<Self>;
}
