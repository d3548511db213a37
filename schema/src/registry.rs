//! The sorted, immutable type registry.

use std::collections::HashSet;

use crate::descriptor::simple_name;
use crate::error::{SchemaError, SchemaResult};
use crate::{is_reserved_name, FieldDescriptor, TypeDescriptor, TypeKind, MAX_REGISTERED_TYPES};

/// A registered type together with its cached field schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredType {
    discriminator: u16,
    descriptor: TypeDescriptor,
    fields: Vec<FieldDescriptor>,
}

impl RegisteredType {
    /// Returns the wire discriminator (position in the sorted registry).
    #[must_use]
    pub const fn discriminator(&self) -> u16 {
        self.discriminator
    }

    /// Returns the full type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// Returns the simple type name used for ordering.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.descriptor.simple_name()
    }

    #[must_use]
    pub const fn kind(&self) -> TypeKind {
        self.descriptor.kind
    }

    /// Returns `true` if decoding may create a fresh instance of this type.
    #[must_use]
    pub const fn is_constructible(&self) -> bool {
        self.descriptor.constructible && matches!(self.descriptor.kind, TypeKind::Class)
    }

    /// Returns the field schema in wire order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    #[must_use]
    pub const fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }
}

/// The closed set of composite types a codec can carry.
///
/// Entries are sorted by simple name once at construction; the index of an
/// entry is its discriminator and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeRegistry {
    types: Vec<RegisteredType>,
}

impl TypeRegistry {
    /// Validates and sorts the given types.
    pub fn new(types: Vec<TypeDescriptor>) -> SchemaResult<Self> {
        if types.len() > MAX_REGISTERED_TYPES {
            return Err(SchemaError::TooManyTypes {
                count: types.len(),
                max: MAX_REGISTERED_TYPES,
            });
        }

        let mut seen = HashSet::new();
        for ty in &types {
            validate_entry(ty)?;
            if !seen.insert(ty.simple_name()) {
                return Err(SchemaError::DuplicateTypeName {
                    name: ty.simple_name().to_string(),
                });
            }
        }

        let mut sorted = types;
        sorted.sort_by(|a, b| a.simple_name().cmp(b.simple_name()));

        let types = sorted
            .into_iter()
            .enumerate()
            .map(|(index, descriptor)| -> SchemaResult<RegisteredType> {
                let fields = descriptor.field_schema()?;
                Ok(RegisteredType {
                    // Bounded by MAX_REGISTERED_TYPES above.
                    discriminator: u16::try_from(index).unwrap_or(u16::MAX),
                    descriptor,
                    fields,
                })
            })
            .collect::<SchemaResult<Vec<_>>>()?;

        Ok(Self { types })
    }

    /// Creates a registry builder.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder { types: Vec::new() }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterates in discriminator order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredType> {
        self.types.iter()
    }

    /// Looks up a type by full or simple name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RegisteredType> {
        let simple = simple_name(name);
        let index = self
            .types
            .binary_search_by(|ty| ty.simple_name().cmp(simple))
            .ok()?;
        let ty = &self.types[index];
        (ty.name() == name || simple == name).then_some(ty)
    }

    /// Returns the discriminator assigned to `name`.
    pub fn discriminator_of(&self, name: &str) -> SchemaResult<u16> {
        self.get(name)
            .map(RegisteredType::discriminator)
            .ok_or_else(|| SchemaError::UnknownTypeName {
                name: name.to_string(),
            })
    }

    /// Returns the type at `discriminator`.
    pub fn type_of(&self, discriminator: u16) -> SchemaResult<&RegisteredType> {
        self.types
            .get(usize::from(discriminator))
            .ok_or(SchemaError::UnknownDiscriminator {
                discriminator,
                registered: self.types.len(),
            })
    }
}

/// Builder for `TypeRegistry`.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    types: Vec<TypeDescriptor>,
}

impl RegistryBuilder {
    /// Adds a type descriptor.
    #[must_use]
    pub fn register(mut self, ty: TypeDescriptor) -> Self {
        self.types.push(ty);
        self
    }

    /// Builds the registry after validation.
    pub fn build(self) -> SchemaResult<TypeRegistry> {
        TypeRegistry::new(self.types)
    }
}

fn validate_entry(ty: &TypeDescriptor) -> SchemaResult<()> {
    if !ty.is_serializable() {
        return Err(SchemaError::InvalidRegistryEntry {
            name: ty.name.clone(),
        });
    }
    if is_reserved_name(ty.simple_name()) {
        return Err(SchemaError::ReservedTypeName {
            name: ty.name.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldType;

    fn marked(name: &str) -> TypeDescriptor {
        TypeDescriptor::class(name).serializable()
    }

    fn names(registry: &TypeRegistry) -> Vec<&str> {
        registry.iter().map(RegisteredType::name).collect()
    }

    #[test]
    fn registry_sorts_by_simple_name() {
        let registry =
            TypeRegistry::new(vec![marked("B"), marked("A"), marked("C")]).unwrap();
        assert_eq!(names(&registry), vec!["A", "B", "C"]);
        assert_eq!(registry.discriminator_of("A").unwrap(), 0);
        assert_eq!(registry.discriminator_of("C").unwrap(), 2);
    }

    #[test]
    fn discriminators_independent_of_input_order() {
        let orders = [["B", "A", "C"], ["A", "B", "C"], ["C", "A", "B"]];
        let expected = TypeRegistry::new(vec![marked("A"), marked("B"), marked("C")]).unwrap();
        for order in orders {
            let registry = TypeRegistry::new(order.iter().map(|name| marked(name)).collect())
                .unwrap();
            for name in ["A", "B", "C"] {
                assert_eq!(
                    registry.discriminator_of(name).unwrap(),
                    expected.discriminator_of(name).unwrap()
                );
            }
        }
    }

    #[test]
    fn qualified_names_sort_by_last_segment() {
        let registry =
            TypeRegistry::new(vec![marked("zoo::Alpha"), marked("aaa::Beta")]).unwrap();
        assert_eq!(names(&registry), vec!["zoo::Alpha", "aaa::Beta"]);
        assert_eq!(registry.discriminator_of("zoo::Alpha").unwrap(), 0);
        assert_eq!(registry.discriminator_of("Beta").unwrap(), 1);
        assert!(registry.get("other::Beta").is_none());
    }

    #[test]
    fn registry_rejects_unmarked_type() {
        let err = TypeRegistry::new(vec![marked("A"), TypeDescriptor::class("Plain")]).unwrap_err();
        assert_eq!(
            err,
            SchemaError::InvalidRegistryEntry {
                name: "Plain".to_string()
            }
        );
    }

    #[test]
    fn registry_accepts_inherited_marker() {
        let leaf = TypeDescriptor::class("Leaf").extends(TypeDescriptor::class("Mid").extends(marked("Root")));
        let registry = TypeRegistry::new(vec![leaf]).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn registry_rejects_duplicate_simple_names() {
        let err = TypeRegistry::new(vec![marked("a::Point"), marked("b::Point")]).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateTypeName { .. }));
    }

    #[test]
    fn registry_rejects_reserved_names() {
        let err = TypeRegistry::new(vec![marked("String")]).unwrap_err();
        assert!(matches!(err, SchemaError::ReservedTypeName { .. }));
        let err = TypeRegistry::new(vec![marked("lib::int")]).unwrap_err();
        assert!(matches!(err, SchemaError::ReservedTypeName { .. }));
    }

    #[test]
    fn registry_rejects_duplicate_fields() {
        let ty = marked("T")
            .field(crate::FieldDescriptor::new("a", FieldType::INT))
            .field(crate::FieldDescriptor::new("a", FieldType::LONG));
        let err = TypeRegistry::new(vec![ty]).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateFieldName { .. }));
    }

    #[test]
    fn type_of_out_of_range() {
        let registry = TypeRegistry::new(
            (0..10).map(|i| marked(&format!("T{i}"))).collect(),
        )
        .unwrap();
        let err = registry.type_of(500).unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownDiscriminator {
                discriminator: 500,
                registered: 10
            }
        );
    }

    #[test]
    fn discriminator_of_unknown() {
        let registry = TypeRegistry::new(vec![marked("A")]).unwrap();
        assert!(matches!(
            registry.discriminator_of("B"),
            Err(SchemaError::UnknownTypeName { .. })
        ));
    }

    #[test]
    fn registered_type_caches_field_schema() {
        let point = marked("Point")
            .field(crate::FieldDescriptor::new("y", FieldType::INT))
            .field(crate::FieldDescriptor::new("x", FieldType::INT));
        let registry = TypeRegistry::builder().register(point).build().unwrap();
        let ty = registry.type_of(0).unwrap();
        let fields: Vec<_> = ty.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(fields, vec!["x", "y"]);
        assert!(ty.is_constructible());
    }

    #[test]
    fn interfaces_register_but_do_not_construct() {
        let registry =
            TypeRegistry::new(vec![TypeDescriptor::interface("Shape").serializable()]).unwrap();
        let ty = registry.type_of(0).unwrap();
        assert_eq!(ty.kind(), TypeKind::Interface);
        assert!(!ty.is_constructible());
    }

    #[test]
    fn empty_registry() {
        let registry = TypeRegistry::default();
        assert!(registry.is_empty());
        assert!(registry.type_of(0).is_err());
    }
}
