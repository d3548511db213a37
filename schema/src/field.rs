//! Field descriptors and declared field types.

/// Primitive scalar kinds, as named in array element-type headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Primitive {
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
    Byte,
}

impl Primitive {
    /// All primitive kinds.
    pub const ALL: [Self; 7] = [
        Self::Short,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
        Self::Char,
        Self::Byte,
    ];

    /// Returns the element-type name written for arrays of this primitive.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Char => "char",
            Self::Byte => "byte",
        }
    }

    /// Parses an element-type name back into a primitive.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

/// The declared (static) type of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldType {
    /// A scalar.
    Primitive(Primitive),
    /// A text string.
    String,
    /// An ordered sequence.
    List,
    /// A key/value mapping.
    Map,
    /// A fixed-size array.
    Array,
    /// An enumerated type, by name.
    Enum(String),
    /// A registered composite type, by name.
    Composite(String),
    /// Any value; the runtime kind decides.
    Any,
}

impl FieldType {
    pub const SHORT: Self = Self::Primitive(Primitive::Short);
    pub const INT: Self = Self::Primitive(Primitive::Int);
    pub const LONG: Self = Self::Primitive(Primitive::Long);
    pub const FLOAT: Self = Self::Primitive(Primitive::Float);
    pub const DOUBLE: Self = Self::Primitive(Primitive::Double);
    pub const CHAR: Self = Self::Primitive(Primitive::Char);
    pub const BYTE: Self = Self::Primitive(Primitive::Byte);

    /// Creates an enum field type.
    #[must_use]
    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::Enum(name.into())
    }

    /// Creates a composite field type.
    #[must_use]
    pub fn composite(name: impl Into<String>) -> Self {
        Self::Composite(name.into())
    }

    /// Returns `true` for enumerated types.
    #[must_use]
    pub const fn is_enum(&self) -> bool {
        matches!(self, Self::Enum(_))
    }
}

/// A data member of a composite type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldDescriptor {
    pub name: String,
    pub ty: FieldType,
    /// Static members belong to the type, not the instance, and are never encoded.
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_static: bool,
}

impl FieldDescriptor {
    /// Creates an instance field.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
            is_static: false,
        }
    }

    /// Creates a static field.
    #[must_use]
    pub fn new_static(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
            is_static: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_names_roundtrip() {
        for primitive in Primitive::ALL {
            assert_eq!(Primitive::from_name(primitive.name()), Some(primitive));
        }
        assert_eq!(Primitive::from_name("Int"), None);
        assert_eq!(Primitive::from_name("object"), None);
    }

    #[test]
    fn field_type_constructors() {
        assert_eq!(FieldType::INT, FieldType::Primitive(Primitive::Int));
        assert!(FieldType::enumeration("Color").is_enum());
        assert!(!FieldType::composite("Point").is_enum());
        assert!(!FieldType::Any.is_enum());
    }

    #[test]
    fn field_descriptor_static_flag() {
        let field = FieldDescriptor::new("x", FieldType::INT);
        assert!(!field.is_static);
        let constant = FieldDescriptor::new_static("ORIGIN", FieldType::composite("Point"));
        assert!(constant.is_static);
    }
}
