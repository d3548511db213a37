//! Introspection and debugging tools for the graphpack codec.
//!
//! This crate provides utilities for inspecting registries and encoded streams:
//!
//! - Load a type registry from JSON
//! - Print discriminators and field schemas
//! - Decode a stream and render the value tree as JSON or an indented outline
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Make it easy to understand what the codec is doing.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use codec::{ElementType, Value};
use schema::{registry_hash, FieldType, TypeDescriptor, TypeKind, TypeRegistry};
use serde::Serialize;
use serde_json::json;

/// Parses a JSON array of type descriptors and builds the registry.
pub fn load_registry(json: &str) -> Result<TypeRegistry> {
    let types: Vec<TypeDescriptor> = serde_json::from_str(json).context("parse registry json")?;
    TypeRegistry::new(types).context("registry validation failed")
}

/// One registered type as shown by `registry`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeSummary {
    pub discriminator: u16,
    pub name: String,
    pub kind: &'static str,
    pub constructible: bool,
    pub fields: Vec<FieldSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSummary {
    pub name: String,
    pub ty: String,
}

/// Everything the `registry` command reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryReport {
    pub fingerprint: String,
    pub types: Vec<TypeSummary>,
}

/// Summarizes a registry in discriminator order.
pub fn registry_report(registry: &TypeRegistry) -> RegistryReport {
    let types = registry
        .iter()
        .map(|ty| TypeSummary {
            discriminator: ty.discriminator(),
            name: ty.name().to_string(),
            kind: match ty.kind() {
                TypeKind::Class => "class",
                TypeKind::Interface => "interface",
            },
            constructible: ty.is_constructible(),
            fields: ty
                .fields()
                .iter()
                .map(|field| FieldSummary {
                    name: field.name.clone(),
                    ty: field_type_label(&field.ty),
                })
                .collect(),
        })
        .collect();
    RegistryReport {
        fingerprint: format!("0x{:016x}", registry_hash(registry)),
        types,
    }
}

/// Renders a registry report as aligned text.
pub fn format_registry(report: &RegistryReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "fingerprint: {}", report.fingerprint);
    let _ = writeln!(out, "types: {}", report.types.len());
    for ty in &report.types {
        let construct = if ty.constructible { "" } else { " (not constructible)" };
        let _ = writeln!(
            out,
            "  [{:>5}] {} {}{}",
            ty.discriminator, ty.kind, ty.name, construct
        );
        for field in &ty.fields {
            let _ = writeln!(out, "          {}: {}", field.name, field.ty);
        }
    }
    out
}

fn field_type_label(ty: &FieldType) -> String {
    match ty {
        FieldType::Primitive(primitive) => primitive.name().to_string(),
        FieldType::String => "String".to_string(),
        FieldType::List => "List".to_string(),
        FieldType::Map => "Map".to_string(),
        FieldType::Array => "Array".to_string(),
        FieldType::Enum(name) => format!("enum {name}"),
        FieldType::Composite(name) => name.clone(),
        FieldType::Any => "any".to_string(),
    }
}

fn element_type_label(element_type: Option<&ElementType>) -> Option<String> {
    element_type.map(|element_type| match element_type {
        ElementType::Primitive(primitive) => primitive.name().to_string(),
        ElementType::Interface(name) | ElementType::Class(name) => name.clone(),
        ElementType::Array => schema::ARRAY_PLACEHOLDER.to_string(),
    })
}

/// Converts a decoded value tree to tagged JSON.
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Short(v) => json!({ "kind": "Short", "value": v }),
        Value::Int(v) => json!({ "kind": "Int", "value": v }),
        Value::Long(v) => json!({ "kind": "Long", "value": v }),
        Value::Float(v) => json!({ "kind": "Float", "value": v }),
        Value::Double(v) => json!({ "kind": "Double", "value": v }),
        Value::String(v) => json!({ "kind": "String", "value": v }),
        Value::Char(v) => json!({ "kind": "Char", "value": v.to_string() }),
        Value::Byte(v) => json!({ "kind": "Byte", "value": v }),
        Value::Enum(ordinal) => json!({ "kind": "Enum", "ordinal": ordinal }),
        Value::List(items) => json!({
            "kind": "List",
            "items": items.iter().map(value_to_json).collect::<Vec<_>>(),
        }),
        Value::Map(entries) => json!({
            "kind": "Map",
            "entries": entries
                .iter()
                .map(|(key, value)| json!([value_to_json(key), value_to_json(value)]))
                .collect::<Vec<_>>(),
        }),
        Value::Array(array) => json!({
            "kind": "Array",
            "element_type": element_type_label(array.element_type.as_ref()),
            "items": array.items.iter().map(value_to_json).collect::<Vec<_>>(),
        }),
        Value::Object(object) => {
            let fields: serde_json::Map<String, serde_json::Value> = object
                .fields()
                .map(|(name, value)| (name.to_string(), value_to_json(value)))
                .collect();
            json!({ "kind": "Object", "type": object.type_name(), "fields": fields })
        }
    }
}

/// Renders a value tree as an indented outline.
pub fn format_value_pretty(value: &Value) -> String {
    let mut out = String::new();
    write_pretty(&mut out, value, 0);
    out
}

fn write_pretty(out: &mut String, value: &Value, indent: usize) {
    let pad = "  ".repeat(indent);
    match value {
        Value::List(items) => {
            let _ = writeln!(out, "List[{}]", items.len());
            for item in items {
                let _ = write!(out, "{pad}  - ");
                write_pretty(out, item, indent + 2);
            }
        }
        Value::Map(entries) => {
            let _ = writeln!(out, "Map[{}]", entries.len());
            for (key, value) in entries {
                let _ = write!(out, "{pad}  key: ");
                write_pretty(out, key, indent + 2);
                let _ = write!(out, "{pad}  val: ");
                write_pretty(out, value, indent + 2);
            }
        }
        Value::Array(array) => {
            let element = element_type_label(array.element_type.as_ref())
                .unwrap_or_else(|| "?".to_string());
            let _ = writeln!(out, "Array<{element}>[{}]", array.len());
            for item in &array.items {
                let _ = write!(out, "{pad}  - ");
                write_pretty(out, item, indent + 2);
            }
        }
        Value::Object(object) => {
            let _ = writeln!(out, "{} {{", object.type_name());
            for (name, field) in object.fields() {
                let _ = write!(out, "{pad}  {name}: ");
                write_pretty(out, field, indent + 1);
            }
            let _ = writeln!(out, "{pad}}}");
        }
        Value::String(v) => {
            let _ = writeln!(out, "{v:?}");
        }
        Value::Char(v) => {
            let _ = writeln!(out, "{v:?}");
        }
        Value::Enum(ordinal) => {
            let _ = writeln!(out, "Enum#{ordinal}");
        }
        Value::Short(v) => {
            let _ = writeln!(out, "{v}i16");
        }
        Value::Int(v) => {
            let _ = writeln!(out, "{v}");
        }
        Value::Long(v) => {
            let _ = writeln!(out, "{v}L");
        }
        Value::Float(v) => {
            let _ = writeln!(out, "{v}f");
        }
        Value::Double(v) => {
            let _ = writeln!(out, "{v}");
        }
        Value::Byte(v) => {
            let _ = writeln!(out, "{v}i8");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codec::{ArrayValue, Codec, Object};
    use schema::{Primitive, SchemaError};

    const REGISTRY_JSON: &str = r#"[
        {
            "name": "Point",
            "serializable": true,
            "fields": [
                { "name": "x", "ty": { "Primitive": "Int" } },
                { "name": "y", "ty": { "Primitive": "Int" } }
            ]
        },
        { "name": "Shape", "kind": "Interface", "serializable": true }
    ]"#;

    #[test]
    fn registry_report_lists_types() {
        let registry = load_registry(REGISTRY_JSON).unwrap();
        let report = registry_report(&registry);
        assert_eq!(report.types.len(), 2);
        assert_eq!(report.types[0].name, "Point");
        assert_eq!(report.types[0].fields[1].ty, "int");
        assert_eq!(report.types[1].kind, "interface");
        assert!(!report.types[1].constructible);
        assert!(report.fingerprint.starts_with("0x"));

        let text = format_registry(&report);
        assert!(text.contains("[    0] class Point"));
        assert!(text.contains("Shape (not constructible)"));
    }

    #[test]
    fn load_registry_rejects_unmarked_types() {
        let err = load_registry(r#"[{ "name": "Loose" }]"#).unwrap_err();
        assert!(err.to_string().contains("registry validation failed"));
        assert!(err.downcast_ref::<SchemaError>().is_some());
    }

    #[test]
    fn load_registry_rejects_bad_json() {
        assert!(load_registry("not json").is_err());
    }

    #[test]
    fn decoded_point_to_json() {
        let registry = load_registry(REGISTRY_JSON).unwrap();
        let codec = Codec::from_registry(registry);
        let bytes = [0x00, 0x00, 0xFF, 0xFE, 0, 0, 0, 3, 0xFF, 0xFE, 0, 0, 0, 4];
        let value = codec.decode(&bytes).unwrap();

        let json = value_to_json(&value);
        assert_eq!(json["kind"], "Object");
        assert_eq!(json["type"], "Point");
        assert_eq!(json["fields"]["x"]["value"], 3);
        assert_eq!(json["fields"]["y"]["kind"], "Int");
    }

    #[test]
    fn arrays_and_maps_to_json() {
        let value = Value::map([(
            Value::from("ints"),
            Value::Array(ArrayValue::of(Primitive::Int, [1, 2, 3])),
        )]);
        let json = value_to_json(&value);
        let entry = &json["entries"][0];
        assert_eq!(entry[0]["value"], "ints");
        assert_eq!(entry[1]["element_type"], "int");
        assert_eq!(entry[1]["items"][2]["value"], 3);

        let empty = value_to_json(&Value::Array(ArrayValue::empty()));
        assert!(empty["element_type"].is_null());
    }

    #[test]
    fn pretty_outline() {
        let value = Value::Object(
            Object::new("Point")
                .with("x", 3)
                .with("y", Value::list([Value::Char('a')])),
        );
        let text = format_value_pretty(&value);
        assert_eq!(text, "Point {\n  x: 3\n  y: List[1]\n    - 'a'\n}\n");
    }
}
