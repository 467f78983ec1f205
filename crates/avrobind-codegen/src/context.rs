//! Shared, read-only state of one generation run.

use avrobind_core::{GenResult, GenerateOptions, LogicalTypeMapping, SchemaNode, SchemaRegistry};

/// Registry and options every component consults while emitting
#[derive(Debug, Clone, Copy)]
pub struct GenContext<'a> {
    pub registry: &'a SchemaRegistry,
    pub options: &'a GenerateOptions,
}

impl<'a> GenContext<'a> {
    pub fn new(registry: &'a SchemaRegistry, options: &'a GenerateOptions) -> Self {
        Self { registry, options }
    }

    /// Follow a named reference to its definition.
    pub fn resolve(&self, node: &'a SchemaNode) -> GenResult<&'a SchemaNode> {
        self.registry.resolve(node)
    }

    /// The logical type mapping that applies to `node`, if any.
    pub fn logical_type(&self, node: &SchemaNode) -> Option<&'a LogicalTypeMapping> {
        self.options.active_logical_type(node)
    }
}
