//! Schema document loader.
//!
//! Turns Avro schema JSON (`.avsc`) into the [`SchemaNode`] object model and a
//! populated [`SchemaRegistry`]. The loader is lenient: it interprets the
//! document shape but does not validate names, defaults or union rules.
//!
//! # Example
//!
//! ```
//! use avrobind_core::SchemaDocument;
//!
//! let doc = SchemaDocument::from_json_str(r#"{
//!     "type": "record",
//!     "name": "User",
//!     "namespace": "com.acme",
//!     "fields": [{"name": "id", "type": "long"}]
//! }"#).unwrap();
//!
//! assert!(doc.registry.contains("com.acme.User"));
//! ```

use crate::error::{GenError, GenResult};
use crate::registry::SchemaRegistry;
use crate::schema::{EnumSchema, Field, FixedSchema, Primitive, RecordSchema, SchemaKind, SchemaNode};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::path::Path;

/// A loaded schema document
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    /// Top-level schemas (several when the document is a JSON array)
    pub roots: Vec<SchemaNode>,

    /// Every named definition in the document
    pub registry: SchemaRegistry,

    /// The document text as loaded
    pub source: String,
}

impl SchemaDocument {
    /// Load a document from a file
    pub fn from_file(path: impl AsRef<Path>) -> GenResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            GenError::InvalidSchema(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&source)
    }

    /// Parse a document from JSON text
    pub fn from_json_str(source: &str) -> GenResult<Self> {
        let value: Value = serde_json::from_str(source)?;
        let roots = match &value {
            Value::Array(items) => items
                .iter()
                .map(|item| parse_node(item, None))
                .collect::<GenResult<Vec<_>>>()?,
            other => vec![parse_node(other, None)?],
        };
        let registry = SchemaRegistry::from_nodes(&roots);
        tracing::debug!(
            roots = roots.len(),
            named_types = registry.len(),
            "loaded schema document"
        );
        Ok(Self {
            roots,
            registry,
            source: source.to_string(),
        })
    }
}

fn parse_node(value: &Value, namespace: Option<&str>) -> GenResult<SchemaNode> {
    match value {
        Value::String(name) => Ok(parse_type_name(name, namespace)),
        Value::Array(alternatives) => {
            let alternatives = alternatives
                .iter()
                .map(|alt| parse_node(alt, namespace))
                .collect::<GenResult<Vec<_>>>()?;
            Ok(SchemaNode::union(alternatives))
        }
        Value::Object(object) => parse_object(object, namespace),
        other => Err(GenError::InvalidSchema(format!(
            "expected a type name, union or object, found {other}"
        ))),
    }
}

fn parse_type_name(name: &str, namespace: Option<&str>) -> SchemaNode {
    match Primitive::from_name(name) {
        Some(primitive) => SchemaNode::primitive(primitive),
        None => SchemaNode::named(qualify(name, namespace)),
    }
}

fn parse_object(object: &Map<String, Value>, namespace: Option<&str>) -> GenResult<SchemaNode> {
    let logical_type = object
        .get("logicalType")
        .and_then(Value::as_str)
        .map(str::to_string);

    let type_value = object
        .get("type")
        .ok_or_else(|| GenError::InvalidSchema("schema object without \"type\"".into()))?;

    let mut node = match type_value {
        Value::String(type_name) => match type_name.as_str() {
            "record" | "error" => parse_record(object, namespace)?,
            "enum" => parse_enum(object, namespace)?,
            "fixed" => parse_fixed(object, namespace)?,
            "array" => {
                let items = object
                    .get("items")
                    .ok_or_else(|| GenError::InvalidSchema("array without \"items\"".into()))?;
                SchemaNode::array(parse_node(items, namespace)?)
            }
            "map" => {
                let values = object
                    .get("values")
                    .ok_or_else(|| GenError::InvalidSchema("map without \"values\"".into()))?;
                SchemaNode::map(parse_node(values, namespace)?)
            }
            other => parse_type_name(other, namespace),
        },
        nested => parse_node(nested, namespace)?,
    };

    if logical_type.is_some() {
        node.logical_type = logical_type;
    }
    Ok(node)
}

fn parse_record(object: &Map<String, Value>, namespace: Option<&str>) -> GenResult<SchemaNode> {
    let (fullname, own_namespace) = definition_name(object, namespace)?;
    let fields_value = object
        .get("fields")
        .and_then(Value::as_array)
        .ok_or_else(|| GenError::InvalidSchema(format!("record {fullname} without \"fields\"")))?;

    let mut fields = Vec::with_capacity(fields_value.len());
    for field in fields_value {
        let field = field.as_object().ok_or_else(|| {
            GenError::InvalidSchema(format!("field of {fullname} is not an object"))
        })?;
        let name = required_str(field, "name", &fullname)?;
        let type_value = field.get("type").ok_or_else(|| {
            GenError::InvalidSchema(format!("field {name} of {fullname} without \"type\""))
        })?;
        fields.push(Field {
            name: name.to_string(),
            schema: parse_node(type_value, own_namespace.as_deref())?,
            default: field.get("default").cloned(),
            doc: doc_of(field),
        });
    }

    Ok(SchemaNode::record(RecordSchema {
        fullname,
        namespace: own_namespace,
        fields,
        doc: doc_of(object),
    }))
}

fn parse_enum(object: &Map<String, Value>, namespace: Option<&str>) -> GenResult<SchemaNode> {
    let (fullname, _) = definition_name(object, namespace)?;
    let symbols = object
        .get("symbols")
        .and_then(Value::as_array)
        .ok_or_else(|| GenError::InvalidSchema(format!("enum {fullname} without \"symbols\"")))?
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect();

    let symbol_docs: IndexMap<String, String> = object
        .get("symbolDocs")
        .and_then(Value::as_object)
        .map(|docs| {
            docs.iter()
                .filter_map(|(symbol, doc)| Some((symbol.clone(), doc.as_str()?.to_string())))
                .collect()
        })
        .unwrap_or_default();

    Ok(SchemaNode::new(SchemaKind::Enum(EnumSchema {
        fullname,
        symbols,
        symbol_docs,
        doc: doc_of(object),
    })))
}

fn parse_fixed(object: &Map<String, Value>, namespace: Option<&str>) -> GenResult<SchemaNode> {
    let (fullname, _) = definition_name(object, namespace)?;
    let size = object
        .get("size")
        .and_then(Value::as_u64)
        .ok_or_else(|| GenError::InvalidSchema(format!("fixed {fullname} without \"size\"")))?;
    Ok(SchemaNode::new(SchemaKind::Fixed(FixedSchema {
        fullname,
        size: size as usize,
    })))
}

/// Fullname and namespace of a named definition, per Avro name resolution:
/// a dotted name is already qualified, otherwise the explicit `namespace`
/// attribute wins over the enclosing namespace.
fn definition_name(
    object: &Map<String, Value>,
    enclosing: Option<&str>,
) -> GenResult<(String, Option<String>)> {
    let name = required_str(object, "name", "named type")?;
    if let Some((ns, _)) = name.rsplit_once('.') {
        let ns = ns.trim_start_matches('.');
        let namespace = (!ns.is_empty()).then(|| ns.to_string());
        return Ok((name.trim_start_matches('.').to_string(), namespace));
    }
    let namespace = match object.get("namespace").and_then(Value::as_str) {
        Some(explicit) => explicit,
        None => enclosing.unwrap_or(""),
    };
    if namespace.is_empty() {
        Ok((name.to_string(), None))
    } else {
        Ok((format!("{namespace}.{name}"), Some(namespace.to_string())))
    }
}

fn qualify(name: &str, namespace: Option<&str>) -> String {
    match namespace {
        _ if name.contains('.') => name.trim_start_matches('.').to_string(),
        Some(ns) if !ns.is_empty() => format!("{ns}.{name}"),
        _ => name.to_string(),
    }
}

fn required_str<'a>(object: &'a Map<String, Value>, key: &str, owner: &str) -> GenResult<&'a str> {
    object
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| GenError::InvalidSchema(format!("{owner}: missing \"{key}\"")))
}

fn doc_of(object: &Map<String, Value>) -> Option<String> {
    object.get("doc").and_then(Value::as_str).map(str::to_string)
}
