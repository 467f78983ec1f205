//! avrobind-core - Schema object model, registries and error types
//!
//! This crate provides the foundational types shared by the avrobind generator:
//! - [`SchemaNode`] and friends, the input object model
//! - [`SchemaRegistry`] for lazy lookup of named types by fullname
//! - [`LogicalTypeRegistry`] for logical type plugins
//! - [`GenerateOptions`] for per-run configuration
//! - [`GenError`] for error handling
//! - [`SchemaDocument`] for loading `.avsc` JSON

mod error;
mod loader;
mod logical;
mod options;
mod registry;
mod schema;

pub use error::{GenError, GenResult};
pub use loader::SchemaDocument;
pub use logical::{LogicalTypeMapping, LogicalTypeRegistry, VALUE_PLACEHOLDER};
pub use options::GenerateOptions;
pub use registry::{SchemaRegistry, clean_fullname};
pub use schema::{EnumSchema, Field, FixedSchema, Primitive, RecordSchema, SchemaKind, SchemaNode};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Field, GenError, GenResult, GenerateOptions, LogicalTypeMapping, Primitive, RecordSchema,
        SchemaDocument, SchemaKind, SchemaNode, SchemaRegistry,
    };
}
