//! Reader dispatch table.
//!
//! Maps the names a decoder may report for a record or enum to the generated
//! class that should wrap the decoded value. Every type is reachable by its
//! fullname, its short name and its leading-dot short name.

use crate::emitter::GeneratedClass;
use crate::instance::{HostValue, RecordInstance};
use crate::naming::{py_str, split_fullname};
use crate::writer::PythonWriter;
use avrobind_core::{GenError, GenResult, GenerateOptions};
use indexmap::IndexMap;
use indexmap::map::Entry;
use serde_json::Value;

/// Whether a dispatch entry wraps records or enums
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchKind {
    Record,
    Enum,
}

/// Target of one dispatch table key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchEntry {
    pub fullname: String,
    pub class_ref: String,
    pub kind: DispatchKind,
}

/// Name -> generated class lookup used when decoding
#[derive(Debug, Clone, Default)]
pub struct ReaderDispatchTable {
    entries: IndexMap<String, DispatchEntry>,
}

impl ReaderDispatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table for `classes`.
    ///
    /// Fullnames are inserted first and always win. Short-name aliases are
    /// first come, first served; a colliding alias is dropped with a warning.
    pub fn build<'a>(classes: impl IntoIterator<Item = &'a GeneratedClass>) -> Self {
        let classes: Vec<&GeneratedClass> = classes.into_iter().collect();
        let mut table = Self::new();

        for class in &classes {
            table.insert(class.fullname.clone(), entry_for(class));
        }
        for class in &classes {
            let (_, short_name) = split_fullname(&class.fullname);
            table.insert(short_name.to_string(), entry_for(class));
            table.insert(format!(".{short_name}"), entry_for(class));
        }

        tracing::debug!(types = classes.len(), keys = table.len(), "built reader dispatch table");
        table
    }

    /// Add `name` unless it is already taken. Returns whether it was added.
    pub fn insert(&mut self, name: String, entry: DispatchEntry) -> bool {
        match self.entries.entry(name) {
            Entry::Vacant(vacant) => {
                vacant.insert(entry);
                true
            }
            Entry::Occupied(occupied) => {
                if occupied.get() != &entry {
                    tracing::warn!(
                        name = %occupied.key(),
                        kept = %occupied.get().fullname,
                        dropped = %entry.fullname,
                        "dispatch name collision; keeping first entry"
                    );
                }
                false
            }
        }
    }

    pub fn lookup(&self, name: &str) -> GenResult<&DispatchEntry> {
        self.entries
            .get(name)
            .ok_or_else(|| GenError::UnknownDispatchName(name.to_string()))
    }

    /// Wrap a decoded value the way the generated reader does: records via
    /// `construct`, enums by passing the decoded symbol to the enum class.
    pub fn reconstruct(&self, name: &str, raw: Value) -> GenResult<HostValue> {
        let entry = self.lookup(name)?;
        match entry.kind {
            DispatchKind::Record => Ok(HostValue::Record(RecordInstance::from_json(
                entry.fullname.as_str(),
                raw,
            )?)),
            DispatchKind::Enum => match raw {
                Value::String(symbol) => Ok(HostValue::Enum {
                    fullname: entry.fullname.clone(),
                    symbol,
                }),
                _ => Err(GenError::InvalidSchema(format!(
                    "expected a JSON string for enum '{}'",
                    entry.fullname
                ))),
            },
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DispatchEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write `__SCHEMA_TYPES`, the JSON converter and `SpecificDatumReader`.
    pub fn emit(&self, options: &GenerateOptions, writer: &mut PythonWriter) {
        writer.line("__SCHEMA_TYPES = {");
        writer.indent();
        for (name, entry) in self.iter() {
            writer.line(format!("{}: {},", py_str(name), entry.class_ref));
        }
        writer.dedent();
        writer.line("}");
        writer.blank();
        writer.line(format!(
            "_json_converter = avrojson.AvroJsonConverter(use_logical_types={}, schema_types=__SCHEMA_TYPES)",
            if options.use_logical_types { "True" } else { "False" }
        ));
        writer.blank();
        writer.blank();

        let base = if options.use_logical_types {
            "logical.LogicalDatumReader"
        } else {
            "DatumReader"
        };
        writer.block(format!("class SpecificDatumReader({base}):"), |w| {
            w.line("SCHEMA_TYPES: Dict[str, type] = {}");
            w.blank();
            w.block("def __init__(self, readers_schema=None, **kwargs):", |w| {
                w.line("writers_schema = kwargs.pop(\"writers_schema\", readers_schema)");
                w.line("writers_schema = kwargs.pop(\"writer_schema\", writers_schema)");
                w.line("super(SpecificDatumReader, self).__init__(writers_schema, readers_schema, **kwargs)");
            });
            w.blank();
            w.block("def read_record(self, writers_schema, readers_schema, decoder):", |w| {
                w.line("result = super(SpecificDatumReader, self).read_record(writers_schema, readers_schema, decoder)");
                w.line("tp = SpecificDatumReader.SCHEMA_TYPES.get(readers_schema.fullname)");
                w.block("if tp is not None:", |w| w.line("result = tp.construct(result)"));
                w.line("return result");
            });
            w.blank();
            w.block("def read_enum(self, writers_schema, readers_schema, decoder):", |w| {
                w.line("result = super(SpecificDatumReader, self).read_enum(writers_schema, readers_schema, decoder)");
                w.line("tp = SpecificDatumReader.SCHEMA_TYPES.get(readers_schema.fullname)");
                w.block("if tp is not None:", |w| w.line("result = tp(result)"));
                w.line("return result");
            });
        });
        writer.blank();
        writer.blank();
        writer.line("SpecificDatumReader.SCHEMA_TYPES = __SCHEMA_TYPES");
    }
}

fn entry_for(class: &GeneratedClass) -> DispatchEntry {
    DispatchEntry {
        fullname: class.fullname.clone(),
        class_ref: class.class_ref.clone(),
        kind: if class.is_record() {
            DispatchKind::Record
        } else {
            DispatchKind::Enum
        },
    }
}
