//! avrobind-codegen - Python bindings from Avro schemas
//!
//! Compiles a schema document into a Python package of typed data classes,
//! one per record and enum, plus the reader dispatch table used to turn
//! decoded values back into those classes.
//!
//! # Architecture
//!
//! ```text
//! SchemaDocument (roots + SchemaRegistry)
//!     ↓
//!  [GenerationSession]   sorted by namespace, then name
//!     ↓
//!  ├─→ [NamespaceTree / ScopeTracker] → scope classes, package __init__.py
//!  ├─→ [Class Emitter] ─→ [type_names] field annotations
//!  │                   └→ [defaults]   field fallback values
//!  └─→ [ReaderDispatchTable] → __SCHEMA_TYPES, SpecificDatumReader
//!     ↓
//!  GeneratedOutput → write_to(dir)
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use avrobind_codegen::GenerationSession;
//! use avrobind_core::{GenerateOptions, SchemaDocument};
//!
//! let document = SchemaDocument::from_file("schema.avsc").unwrap();
//! let session = GenerationSession::from_document(document, GenerateOptions::default());
//! let output = session.generate().unwrap();
//! output.write_to("out/").unwrap();
//! ```
//!
//! # Generated Layout
//!
//! - `schema_classes.py` - every class, nested in one scope class per namespace segment
//! - `schema.avsc` - the document, parsed lazily by the generated registry
//! - `__init__.py` - exports null-namespace classes and `SpecificDatumReader`
//! - `<ns>/.../__init__.py` - re-exports the classes of each namespace

pub mod context;
pub mod defaults;
pub mod dispatch;
pub mod emitter;
pub mod instance;
pub mod namespace;
pub mod naming;
pub mod output;
pub mod preamble;
pub mod session;
pub mod type_names;
pub mod writer;

pub use context::GenContext;
pub use defaults::{DefaultExpression, ensure_acyclic_defaults, find_type_of_default, resolve_default};
pub use dispatch::{DispatchEntry, DispatchKind, ReaderDispatchTable};
pub use emitter::{GeneratedClass, GeneratedField, GeneratedKind, emit_enum, emit_record};
pub use instance::{DefaultMaterializer, HostValue, RecordInstance};
pub use namespace::{NamespaceTree, ScopeTracker, ScopeTransition};
pub use output::{GeneratedOutput, OutputUnit};
pub use session::GenerationSession;
pub use type_names::type_name_of;
pub use writer::PythonWriter;
