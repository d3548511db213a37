//! The in-memory object graph.

use std::collections::BTreeMap;

use schema::{Primitive, ARRAY_PLACEHOLDER};

/// A node of an encodable object graph.
///
/// There is no null variant: absence can only show up as a missing
/// [`Object`] field, which the encoder rejects.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Char(char),
    Byte(i8),
    List(Vec<Value>),
    /// Entries in wire order.
    Map(Vec<(Value, Value)>),
    Array(ArrayValue),
    /// An enum constant, carried by ordinal only.
    Enum(i32),
    Object(Object),
}

impl Value {
    /// Creates a list from anything convertible into values.
    pub fn list<T: Into<Self>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Creates a map from key/value pairs, keeping their order.
    pub fn map<K: Into<Self>, V: Into<Self>>(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        Self::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Returns the runtime type name: a built-in kind name, the nested-array
    /// placeholder, or the composite's type name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Array(_) => ARRAY_PLACEHOLDER,
            Self::Object(object) => object.type_name(),
            other => other.kind_name(),
        }
    }

    /// Returns the name of the variant.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Short(_) => "Short",
            Self::Int(_) => "Int",
            Self::Long(_) => "Long",
            Self::Float(_) => "Float",
            Self::Double(_) => "Double",
            Self::String(_) => "String",
            Self::Char(_) => "Char",
            Self::Byte(_) => "Byte",
            Self::List(_) => "List",
            Self::Map(_) => "Map",
            Self::Array(_) => "Array",
            Self::Enum(_) => "Enum",
            Self::Object(_) => "Object",
        }
    }
}

/// The declared component type of an array.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// A primitive scalar.
    Primitive(Primitive),
    /// An interface; the name is written as-is.
    Interface(String),
    /// Nested arrays.
    Array,
    /// A concrete class; the first element's runtime type name is written.
    Class(String),
}

/// A fixed-size array and its element type.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayValue {
    /// `None` only for arrays decoded from a zero-length header, which carries
    /// no element-type name.
    pub element_type: Option<ElementType>,
    pub items: Vec<Value>,
}

impl ArrayValue {
    #[must_use]
    pub const fn new(element_type: ElementType, items: Vec<Value>) -> Self {
        Self {
            element_type: Some(element_type),
            items,
        }
    }

    /// Creates an array of primitives.
    pub fn of<T: Into<Value>>(primitive: Primitive, items: impl IntoIterator<Item = T>) -> Self {
        Self::new(
            ElementType::Primitive(primitive),
            items.into_iter().map(Into::into).collect(),
        )
    }

    /// Creates the empty array a zero-length header decodes to.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            element_type: None,
            items: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// An instance of a registered composite type.
///
/// Fields are keyed by name; the encoder visits them in the registry's field
/// schema order, not in map order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Object {
    type_name: String,
    fields: BTreeMap<String, Value>,
}

impl Object {
    /// Creates an object with no field values.
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Sets a field and returns the object.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    /// Sets a field, returning the previous value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Removes a field and returns its value.
    pub fn take(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Iterates over fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Self::Object(object)
    }
}

impl From<ArrayValue> for Value {
    fn from(array: ArrayValue) -> Self {
        Self::Array(array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_names() {
        assert_eq!(Value::Int(1).type_name(), "Int");
        assert_eq!(Value::String("s".into()).type_name(), "String");
        assert_eq!(Value::Array(ArrayValue::empty()).type_name(), "object");
        assert_eq!(Value::Object(Object::new("Point")).type_name(), "Point");
        assert_eq!(Value::Object(Object::new("Point")).kind_name(), "Object");
    }

    #[test]
    fn builtin_type_names_are_reserved() {
        let samples = [
            Value::Short(0),
            Value::Int(0),
            Value::Long(0),
            Value::Float(0.0),
            Value::Double(0.0),
            Value::Char('a'),
            Value::Byte(0),
            Value::String(String::new()),
            Value::List(Vec::new()),
            Value::Map(Vec::new()),
            Value::Enum(0),
            Value::Array(ArrayValue::empty()),
        ];
        for sample in samples {
            assert!(
                schema::is_reserved_name(sample.type_name()),
                "{} should be reserved",
                sample.type_name()
            );
        }
    }

    #[test]
    fn list_and_map_constructors() {
        let list = Value::list([1, 2, 3]);
        assert_eq!(
            list,
            Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );

        let map = Value::map([("b", 2i64), ("a", 1i64)]);
        match map {
            Value::Map(entries) => {
                assert_eq!(entries[0].0, Value::String("b".to_string()));
                assert_eq!(entries[1].1, Value::Long(1));
            }
            other => panic!("unexpected value {other:?}"),
        }
    }

    #[test]
    fn object_field_access() {
        let mut point = Object::new("Point").with("x", 3).with("y", 4);
        assert_eq!(point.len(), 2);
        assert_eq!(point.get("x"), Some(&Value::Int(3)));
        assert_eq!(point.set("x", 5), Some(Value::Int(3)));
        assert_eq!(point.take("y"), Some(Value::Int(4)));
        assert!(point.get("y").is_none());
        let names: Vec<_> = point.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["x"]);
    }

    #[test]
    fn object_equality_ignores_insertion_order() {
        let a = Object::new("P").with("x", 1).with("y", 2);
        let b = Object::new("P").with("y", 2).with("x", 1);
        assert_eq!(a, b);
    }

    #[test]
    fn array_constructors() {
        let ints = ArrayValue::of(Primitive::Int, [1, 2, 3]);
        assert_eq!(ints.len(), 3);
        assert_eq!(
            ints.element_type,
            Some(ElementType::Primitive(Primitive::Int))
        );
        assert!(ArrayValue::empty().is_empty());
        assert!(ArrayValue::empty().element_type.is_none());
    }
}
