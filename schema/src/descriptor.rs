//! Composite type descriptors.

use std::iter;

use crate::error::{SchemaError, SchemaResult};
use crate::FieldDescriptor;

/// Whether a descriptor names a concrete class or an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
}

/// Describes one application type: its name, ancestry, and data members.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeDescriptor {
    /// Type name, optionally qualified with `::` or `.` separators.
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: TypeKind,
    /// The type itself carries the serializable marker.
    #[cfg_attr(feature = "serde", serde(default))]
    pub serializable: bool,
    /// The type has a zero-argument construction path.
    #[cfg_attr(feature = "serde", serde(default = "default_constructible"))]
    pub constructible: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub parent: Option<Box<TypeDescriptor>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub fields: Vec<FieldDescriptor>,
}

#[cfg(feature = "serde")]
const fn default_constructible() -> bool {
    true
}

impl TypeDescriptor {
    /// Creates a constructible class with no fields and no marker.
    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Class,
            serializable: false,
            constructible: true,
            parent: None,
            fields: Vec::new(),
        }
    }

    /// Creates an interface. Interfaces are never constructible.
    #[must_use]
    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Interface,
            constructible: false,
            ..Self::class(name)
        }
    }

    /// Marks the type itself as serializable.
    #[must_use]
    pub fn serializable(mut self) -> Self {
        self.serializable = true;
        self
    }

    /// Sets the direct ancestor.
    #[must_use]
    pub fn extends(mut self, parent: Self) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    /// Removes the zero-argument construction path.
    #[must_use]
    pub fn without_default_constructor(mut self) -> Self {
        self.constructible = false;
        self
    }

    /// Adds a field.
    #[must_use]
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Returns the last path segment of the name.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }

    /// Iterates over ancestors, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = &Self> {
        iter::successors(self.parent.as_deref(), |ancestor| ancestor.parent.as_deref())
    }

    /// Returns `true` if this type or any ancestor carries the serializable marker.
    #[must_use]
    pub fn is_serializable(&self) -> bool {
        self.serializable || self.ancestors().any(|ancestor| ancestor.serializable)
    }

    /// Derives the ordered field schema: every non-static field of the type and
    /// its ancestors, sorted ascending by name.
    ///
    /// The sort is stable, so the order depends only on this descriptor.
    pub fn field_schema(&self) -> SchemaResult<Vec<FieldDescriptor>> {
        let mut fields: Vec<FieldDescriptor> = iter::once(self)
            .chain(self.ancestors())
            .flat_map(|ty| ty.fields.iter())
            .filter(|field| !field.is_static)
            .cloned()
            .collect();
        fields.sort_by(|a, b| a.name.cmp(&b.name));

        if let Some(pair) = fields.windows(2).find(|pair| pair[0].name == pair[1].name) {
            return Err(SchemaError::DuplicateFieldName {
                type_name: self.name.clone(),
                field: pair[0].name.clone(),
            });
        }
        Ok(fields)
    }
}

/// Returns the last `::`- or `.`-separated segment of a type name.
#[must_use]
pub fn simple_name(name: &str) -> &str {
    name.rsplit(|c| c == ':' || c == '.').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldType;

    #[test]
    fn simple_name_strips_paths() {
        assert_eq!(simple_name("Point"), "Point");
        assert_eq!(simple_name("geo::shapes::Point"), "Point");
        assert_eq!(simple_name("net.xy.Point"), "Point");
    }

    #[test]
    fn marker_on_type_is_serializable() {
        assert!(TypeDescriptor::class("A").serializable().is_serializable());
        assert!(!TypeDescriptor::class("A").is_serializable());
    }

    #[test]
    fn marker_found_on_distant_ancestor() {
        let root = TypeDescriptor::class("Root").serializable();
        let middle = TypeDescriptor::class("Middle").extends(root);
        let leaf = TypeDescriptor::class("Leaf").extends(middle);
        assert!(leaf.is_serializable());
        assert_eq!(leaf.ancestors().count(), 2);
    }

    #[test]
    fn unmarked_chain_is_not_serializable() {
        let root = TypeDescriptor::class("Root");
        let leaf = TypeDescriptor::class("Leaf").extends(TypeDescriptor::class("Mid").extends(root));
        assert!(!leaf.is_serializable());
    }

    #[test]
    fn interface_is_not_constructible() {
        let iface = TypeDescriptor::interface("Shape");
        assert_eq!(iface.kind, TypeKind::Interface);
        assert!(!iface.constructible);
    }

    #[test]
    fn field_schema_sorted_across_ancestors() {
        let base = TypeDescriptor::class("Base")
            .serializable()
            .field(FieldDescriptor::new("id", FieldType::LONG))
            .field(FieldDescriptor::new_static("COUNT", FieldType::INT));
        let point = TypeDescriptor::class("Point")
            .extends(base)
            .field(FieldDescriptor::new("y", FieldType::INT))
            .field(FieldDescriptor::new("x", FieldType::INT));

        let names: Vec<_> = point
            .field_schema()
            .unwrap()
            .into_iter()
            .map(|field| field.name)
            .collect();
        assert_eq!(names, vec!["id", "x", "y"]);
    }

    #[test]
    fn field_schema_rejects_shadowed_field() {
        let base = TypeDescriptor::class("Base")
            .serializable()
            .field(FieldDescriptor::new("id", FieldType::LONG));
        let child = TypeDescriptor::class("Child")
            .extends(base)
            .field(FieldDescriptor::new("id", FieldType::INT));
        let err = child.field_schema().unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateFieldName { .. }));
    }

    #[test]
    fn static_fields_may_share_names() {
        let ty = TypeDescriptor::class("T")
            .serializable()
            .field(FieldDescriptor::new("a", FieldType::INT))
            .field(FieldDescriptor::new_static("a", FieldType::INT));
        assert_eq!(ty.field_schema().unwrap().len(), 1);
    }
}
