//! Schema registry: named definitions keyed by fullname.
//!
//! A registry is populated once, before emission, and is append-only for the
//! rest of the run. Generated classes resolve their own schema lazily through
//! it by fullname, so declaration order of the named types does not need to be
//! a topological sort.

use crate::error::{GenError, GenResult};
use crate::schema::{RecordSchema, SchemaKind, SchemaNode};
use indexmap::IndexMap;

/// Named schema definitions of one document, in registration order
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    types: IndexMap<String, SchemaNode>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from top-level schema nodes, registering every named
    /// definition reachable from them.
    pub fn from_nodes<'a>(roots: impl IntoIterator<Item = &'a SchemaNode>) -> Self {
        let mut registry = Self::new();
        for root in roots {
            registry.register_all(root);
        }
        registry
    }

    /// Register a single named definition.
    ///
    /// The first definition of a fullname wins; later ones are ignored.
    /// Returns `false` for anonymous nodes and already-known names.
    pub fn register(&mut self, node: &SchemaNode) -> bool {
        if !node.is_named_definition() {
            return false;
        }
        let Some(fullname) = node.fullname() else {
            return false;
        };
        let key = clean_fullname(fullname).to_string();
        if self.types.contains_key(&key) {
            tracing::debug!(fullname = %key, "named type already registered");
            return false;
        }
        tracing::trace!(fullname = %key, "registered named type");
        self.types.insert(key, node.clone());
        true
    }

    /// Register `node` and every named definition nested inside it.
    pub fn register_all(&mut self, node: &SchemaNode) {
        self.register(node);
        match &node.kind {
            SchemaKind::Record(record) => {
                for field in &record.fields {
                    self.register_all(&field.schema);
                }
            }
            SchemaKind::Array(items) => self.register_all(items),
            SchemaKind::Map(values) => self.register_all(values),
            SchemaKind::Union(alternatives) => {
                for alternative in alternatives {
                    self.register_all(alternative);
                }
            }
            SchemaKind::Primitive(_)
            | SchemaKind::Fixed(_)
            | SchemaKind::Enum(_)
            | SchemaKind::Named(_) => {}
        }
    }

    pub fn get(&self, fullname: &str) -> Option<&SchemaNode> {
        self.types.get(clean_fullname(fullname))
    }

    pub fn contains(&self, fullname: &str) -> bool {
        self.types.contains_key(clean_fullname(fullname))
    }

    /// Look up a named definition, failing with [`GenError::UnknownType`].
    pub fn lookup(&self, fullname: &str) -> GenResult<&SchemaNode> {
        self.get(fullname)
            .ok_or_else(|| GenError::UnknownType(fullname.to_string()))
    }

    /// Follow a [`SchemaKind::Named`] reference to its definition; any other
    /// node is returned unchanged.
    pub fn resolve<'a>(&'a self, node: &'a SchemaNode) -> GenResult<&'a SchemaNode> {
        match &node.kind {
            SchemaKind::Named(fullname) => self.lookup(fullname),
            _ => Ok(node),
        }
    }

    /// Look up a record definition by fullname.
    pub fn record(&self, fullname: &str) -> GenResult<&RecordSchema> {
        match &self.lookup(fullname)?.kind {
            SchemaKind::Record(record) => Ok(record),
            _ => Err(GenError::UnknownType(fullname.to_string())),
        }
    }

    /// Named definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.types.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Strip the leading dot that null-namespace fullnames sometimes carry.
pub fn clean_fullname(fullname: &str) -> &str {
    fullname.trim_start_matches('.')
}
