//! Logical-type plugin registry
//!
//! The generator has no built-in knowledge of any logical type. Callers
//! register, per `logicalType` identifier, the host type name, a zero-argument
//! initializer and a conversion template applied to a raw default value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder substituted with the raw value expression in a conversion template.
pub const VALUE_PLACEHOLDER: &str = "{value}";

/// Host-language rendering of one logical type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalTypeMapping {
    /// Type annotation used for fields of this logical type (e.g. `datetime.date`)
    pub type_name: String,

    /// Zero-argument initializer expression (e.g. `datetime.date.today()`)
    pub initializer: String,

    /// Conversion template; `{value}` is replaced with the raw default expression
    pub conversion: String,
}

impl LogicalTypeMapping {
    pub fn new(
        type_name: impl Into<String>,
        initializer: impl Into<String>,
        conversion: impl Into<String>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            initializer: initializer.into(),
            conversion: conversion.into(),
        }
    }

    /// Apply the conversion template to a raw value expression.
    pub fn convert(&self, raw_value: &str) -> String {
        self.conversion.replace(VALUE_PLACEHOLDER, raw_value)
    }
}

/// Registry of logical type mappings keyed by `logicalType` identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogicalTypeRegistry {
    mappings: BTreeMap<String, LogicalTypeMapping>,
}

impl LogicalTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mapping, replacing any previous mapping for the identifier.
    pub fn register(&mut self, logical_type: impl Into<String>, mapping: LogicalTypeMapping) {
        let logical_type = logical_type.into();
        tracing::debug!(logical_type = %logical_type, type_name = %mapping.type_name, "registered logical type");
        self.mappings.insert(logical_type, mapping);
    }

    pub fn get(&self, logical_type: &str) -> Option<&LogicalTypeMapping> {
        self.mappings.get(logical_type)
    }

    pub fn contains(&self, logical_type: &str) -> bool {
        self.mappings.contains_key(logical_type)
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LogicalTypeMapping)> {
        self.mappings.iter().map(|(k, v)| (k.as_str(), v))
    }
}
