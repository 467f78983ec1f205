//! Generation options

use crate::logical::{LogicalTypeMapping, LogicalTypeRegistry};
use crate::schema::SchemaNode;
use serde::{Deserialize, Serialize};

/// Options for one generation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Map annotated nodes through the logical type registry
    ///
    /// When disabled, `logicalType` annotations are ignored and nodes map by
    /// their structural kind.
    #[serde(default)]
    pub use_logical_types: bool,

    /// Additional modules imported by the generated preamble
    #[serde(default)]
    pub extra_imports: Vec<String>,

    /// Logical type plugins
    #[serde(default)]
    pub logical_types: LogicalTypeRegistry,
}

impl GenerateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create options from JSON bytes
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_slice(bytes)
    }

    pub fn with_logical_types(mut self, enabled: bool) -> Self {
        self.use_logical_types = enabled;
        self
    }

    pub fn with_import(mut self, module: impl Into<String>) -> Self {
        self.extra_imports.push(module.into());
        self
    }

    pub fn with_logical_type(
        mut self,
        logical_type: impl Into<String>,
        mapping: LogicalTypeMapping,
    ) -> Self {
        self.logical_types.register(logical_type, mapping);
        self
    }

    /// The mapping that applies to `node`, if logical types are enabled and
    /// the node's annotation is registered.
    pub fn active_logical_type(&self, node: &SchemaNode) -> Option<&LogicalTypeMapping> {
        if !self.use_logical_types {
            return None;
        }
        node.logical_type
            .as_deref()
            .and_then(|id| self.logical_types.get(id))
    }
}
