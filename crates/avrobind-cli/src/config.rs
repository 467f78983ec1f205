//! `avrobind.toml` parsing and validation

use anyhow::{Context, Result};
use avrobind_core::{GenerateOptions, LogicalTypeMapping, VALUE_PLACEHOLDER};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// avrobind.toml structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub generate: GenerateSection,

    /// Logical type plugins keyed by `logicalType` identifier
    #[serde(default)]
    pub logical_types: BTreeMap<String, LogicalTypeMapping>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateSection {
    #[serde(default)]
    pub use_logical_types: bool,

    #[serde(default)]
    pub extra_imports: Vec<String>,
}

impl ConfigFile {
    /// Load config from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config: {:?}", path.as_ref()))?;

        Self::from_str(&content)
    }

    /// Parse config from string
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config")
    }

    /// Validate the config
    pub fn validate(&self) -> Result<()> {
        for module in &self.generate.extra_imports {
            if module.trim().is_empty() {
                anyhow::bail!("Extra import cannot be empty");
            }
        }

        for (id, mapping) in &self.logical_types {
            if id.is_empty() {
                anyhow::bail!("Logical type identifier cannot be empty");
            }
            if mapping.type_name.is_empty() {
                anyhow::bail!("Type name cannot be empty for logical type '{}'", id);
            }
            if mapping.initializer.is_empty() {
                anyhow::bail!("Initializer cannot be empty for logical type '{}'", id);
            }
            if !mapping.conversion.contains(VALUE_PLACEHOLDER) {
                anyhow::bail!(
                    "Conversion for logical type '{}' must contain {}",
                    id,
                    VALUE_PLACEHOLDER
                );
            }
        }

        Ok(())
    }

    /// Generation options described by this file
    pub fn to_options(&self) -> GenerateOptions {
        let mut options = GenerateOptions::new().with_logical_types(self.generate.use_logical_types);
        for module in &self.generate.extra_imports {
            options = options.with_import(module.clone());
        }
        for (id, mapping) in &self.logical_types {
            options = options.with_logical_type(id.clone(), mapping.clone());
        }
        options
    }
}

/// Apply command-line flags on top of file options.
///
/// `--logical-types` can only switch logical types on; `--import` modules
/// are appended unless already present.
pub fn apply_flags(mut options: GenerateOptions, logical_types: bool, imports: Vec<String>) -> GenerateOptions {
    if logical_types {
        options.use_logical_types = true;
    }
    for module in imports {
        if !options.extra_imports.contains(&module) {
            options.extra_imports.push(module);
        }
    }
    options
}
