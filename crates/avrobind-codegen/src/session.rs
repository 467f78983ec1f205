//! Generation session: one deterministic pass over a schema document.

use crate::context::GenContext;
use crate::defaults::ensure_acyclic_defaults;
use crate::dispatch::ReaderDispatchTable;
use crate::emitter::{emit_enum, emit_record};
use crate::instance::DefaultMaterializer;
use crate::namespace::{NamespaceTree, ScopeTracker, ScopeTransition, render_root_init};
use crate::naming::{namespace_segments, split_fullname};
use crate::output::{GeneratedOutput, OutputUnit};
use crate::preamble::{write_imports, write_registry};
use crate::writer::PythonWriter;
use avrobind_core::{GenResult, GenerateOptions, SchemaDocument, SchemaKind, SchemaNode, SchemaRegistry};

/// Name of the generated module holding every class.
pub const SCHEMA_CLASSES_FILE: &str = "schema_classes.py";

/// Name of the schema document copied next to the module.
pub const SCHEMA_FILE: &str = "schema.avsc";

/// Owns the registry and options of one generation run
#[derive(Debug, Clone)]
pub struct GenerationSession {
    registry: SchemaRegistry,
    options: GenerateOptions,
    schema_json: String,
}

impl GenerationSession {
    /// `schema_json` is the document text the generated registry parses at runtime.
    pub fn new(registry: SchemaRegistry, options: GenerateOptions, schema_json: impl Into<String>) -> Self {
        Self {
            registry,
            options,
            schema_json: schema_json.into(),
        }
    }

    pub fn from_document(document: SchemaDocument, options: GenerateOptions) -> Self {
        Self::new(document.registry, options, document.source)
    }

    pub fn from_json_str(source: &str, options: GenerateOptions) -> GenResult<Self> {
        Ok(Self::from_document(SchemaDocument::from_json_str(source)?, options))
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    pub fn context(&self) -> GenContext<'_> {
        GenContext::new(&self.registry, &self.options)
    }

    pub fn materializer(&self) -> DefaultMaterializer<'_> {
        DefaultMaterializer::new(self.context())
    }

    /// Records and enums, sorted by namespace path, then short name.
    ///
    /// Sorting keeps every namespace subtree contiguous, so no scope class
    /// is ever reopened.
    pub fn emission_order(&self) -> Vec<(&str, &SchemaNode)> {
        let mut types: Vec<(&str, &SchemaNode)> = self
            .registry
            .iter()
            .filter(|(_, node)| matches!(node.kind, SchemaKind::Record(_) | SchemaKind::Enum(_)))
            .collect();
        types.sort_by_cached_key(|(fullname, _)| {
            let (namespace, short_name) = split_fullname(fullname);
            (namespace_segments(namespace), short_name.to_string())
        });
        types
    }

    /// Run the generator and collect every output unit in memory.
    pub fn generate(&self) -> GenResult<GeneratedOutput> {
        let ctx = self.context();
        let mut writer = PythonWriter::new();
        write_imports(&self.options, &mut writer);
        writer.blank();
        writer.blank();
        write_registry(&mut writer);

        let mut namespaces = NamespaceTree::new();
        let mut scopes = ScopeTracker::new();
        let mut classes = Vec::new();

        for (fullname, node) in self.emission_order() {
            if let SchemaKind::Record(_) = node.kind {
                ensure_acyclic_defaults(fullname, &ctx)?;
            }

            writer.blank();
            writer.blank();
            let path = namespaces.register(fullname);
            write_transition(&scopes.transition(&path), &mut writer);

            let class = match &node.kind {
                SchemaKind::Record(record) => emit_record(record, &ctx, &mut writer)?,
                SchemaKind::Enum(schema) => emit_enum(schema, &mut writer),
                _ => continue,
            };
            classes.push(class);
        }
        write_transition(&scopes.close_all(), &mut writer);

        writer.blank();
        writer.blank();
        let dispatch = ReaderDispatchTable::build(&classes);
        dispatch.emit(&self.options, &mut writer);

        let root_members = namespaces.members(&[]).unwrap_or_default();
        let mut units = vec![
            OutputUnit::new(SCHEMA_CLASSES_FILE, writer.finish()),
            OutputUnit::new(SCHEMA_FILE, self.schema_json.clone()),
            OutputUnit::new("__init__.py", render_root_init(root_members)),
        ];
        units.extend(
            namespaces
                .package_inits()
                .into_iter()
                .map(|(path, contents)| OutputUnit::new(path, contents)),
        );

        tracing::info!(
            classes = classes.len(),
            containers = namespaces.len(),
            dispatch_keys = dispatch.len(),
            units = units.len(),
            "generated python bindings"
        );

        Ok(GeneratedOutput {
            units,
            classes,
            dispatch,
            namespaces,
        })
    }
}

/// Close scopes by dedenting, open them as nested scope classes.
fn write_transition(transition: &ScopeTransition, writer: &mut PythonWriter) {
    for _ in 0..transition.close {
        writer.dedent();
    }
    for segment in &transition.open {
        writer.line(format!("class {segment}(object):"));
        writer.indent();
    }
}

#[cfg(test)]
#[path = "session/session_tests.rs"]
mod session_tests;
