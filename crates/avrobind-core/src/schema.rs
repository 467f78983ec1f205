//! Schema object model consumed by the generator.
//!
//! The model mirrors the Avro type system: primitives, named types (records,
//! enums, fixed), containers (arrays, maps) and unions. Any node may carry a
//! `logicalType` annotation.
//!
//! Named types are defined once, at their first occurrence. Every later use
//! site refers to the definition through [`SchemaKind::Named`], which keeps
//! recursive schemas finite. References are resolved through
//! [`SchemaRegistry`](crate::SchemaRegistry).

use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;

/// Avro primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
}

impl Primitive {
    /// Parse a primitive type name (`"int"`, `"string"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "null" => Some(Primitive::Null),
            "boolean" => Some(Primitive::Boolean),
            "int" => Some(Primitive::Int),
            "long" => Some(Primitive::Long),
            "float" => Some(Primitive::Float),
            "double" => Some(Primitive::Double),
            "bytes" => Some(Primitive::Bytes),
            "string" => Some(Primitive::String),
            _ => None,
        }
    }

    /// The schema name of this primitive.
    pub fn name(self) -> &'static str {
        match self {
            Primitive::Null => "null",
            Primitive::Boolean => "boolean",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Bytes => "bytes",
            Primitive::String => "string",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A schema node: a kind plus an optional logical type annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    pub kind: SchemaKind,
    pub logical_type: Option<String>,
}

/// The structural kind of a [`SchemaNode`].
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    Primitive(Primitive),
    Fixed(FixedSchema),
    Enum(EnumSchema),
    Array(Box<SchemaNode>),
    Map(Box<SchemaNode>),
    Union(Vec<SchemaNode>),
    Record(RecordSchema),

    /// Reference to a named type defined elsewhere in the document.
    Named(String),
}

/// A record definition.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    /// Dot-qualified name.
    pub fullname: String,

    /// Namespace, if any. `None` and `Some("")` both mean the null namespace.
    pub namespace: Option<String>,

    pub fields: Vec<Field>,

    pub doc: Option<String>,
}

/// An enum definition.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumSchema {
    pub fullname: String,
    pub symbols: Vec<String>,

    /// Per-symbol documentation, keyed by symbol.
    pub symbol_docs: IndexMap<String, String>,

    pub doc: Option<String>,
}

/// A fixed-size byte sequence definition.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedSchema {
    pub fullname: String,
    pub size: usize,
}

/// A record field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Wire name, used verbatim as the storage key.
    pub name: String,

    pub schema: SchemaNode,

    /// Declared default. An explicit JSON `null` default is `Some(Value::Null)`.
    pub default: Option<Value>,

    pub doc: Option<String>,
}

impl SchemaNode {
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            logical_type: None,
        }
    }

    pub fn primitive(primitive: Primitive) -> Self {
        Self::new(SchemaKind::Primitive(primitive))
    }

    pub fn array(items: SchemaNode) -> Self {
        Self::new(SchemaKind::Array(Box::new(items)))
    }

    pub fn map(values: SchemaNode) -> Self {
        Self::new(SchemaKind::Map(Box::new(values)))
    }

    pub fn union(alternatives: Vec<SchemaNode>) -> Self {
        Self::new(SchemaKind::Union(alternatives))
    }

    pub fn named(fullname: impl Into<String>) -> Self {
        Self::new(SchemaKind::Named(fullname.into()))
    }

    pub fn record(record: RecordSchema) -> Self {
        Self::new(SchemaKind::Record(record))
    }

    pub fn enumeration(schema: EnumSchema) -> Self {
        Self::new(SchemaKind::Enum(schema))
    }

    pub fn fixed(fullname: impl Into<String>, size: usize) -> Self {
        Self::new(SchemaKind::Fixed(FixedSchema {
            fullname: fullname.into(),
            size,
        }))
    }

    /// Attach a `logicalType` annotation.
    pub fn with_logical_type(mut self, logical_type: impl Into<String>) -> Self {
        self.logical_type = Some(logical_type.into());
        self
    }

    /// Fullname of a named definition or reference, `None` for anonymous kinds.
    pub fn fullname(&self) -> Option<&str> {
        match &self.kind {
            SchemaKind::Record(r) => Some(&r.fullname),
            SchemaKind::Enum(e) => Some(&e.fullname),
            SchemaKind::Fixed(f) => Some(&f.fullname),
            SchemaKind::Named(name) => Some(name),
            _ => None,
        }
    }

    /// Whether this node is a named definition (record, enum or fixed).
    pub fn is_named_definition(&self) -> bool {
        matches!(
            self.kind,
            SchemaKind::Record(_) | SchemaKind::Enum(_) | SchemaKind::Fixed(_)
        )
    }

    /// Whether this node is the primitive `null`.
    pub fn is_null(&self) -> bool {
        matches!(self.kind, SchemaKind::Primitive(Primitive::Null))
    }
}

impl RecordSchema {
    pub fn new(fullname: impl Into<String>) -> Self {
        let fullname = fullname.into();
        let namespace = fullname
            .rsplit_once('.')
            .map(|(ns, _)| ns.trim_start_matches('.').to_string());
        Self {
            fullname,
            namespace,
            fields: Vec::new(),
            doc: None,
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Look up a field by wire name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl EnumSchema {
    pub fn new<I, S>(fullname: impl Into<String>, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fullname: fullname.into(),
            symbols: symbols.into_iter().map(Into::into).collect(),
            symbol_docs: IndexMap::new(),
            doc: None,
        }
    }

    pub fn with_symbol_doc(mut self, symbol: impl Into<String>, doc: impl Into<String>) -> Self {
        self.symbol_docs.insert(symbol.into(), doc.into());
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

impl Field {
    pub fn new(name: impl Into<String>, schema: SchemaNode) -> Self {
        Self {
            name: name.into(),
            schema,
            default: None,
            doc: None,
        }
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}
