//! Module preamble of `schema_classes.py`: imports and the schema registry.

use crate::writer::PythonWriter;
use avrobind_core::GenerateOptions;

/// Imports, in order. Extra imports follow the standard library ones.
pub fn write_imports(options: &GenerateOptions, writer: &mut PythonWriter) {
    for module in ["json", "os.path", "decimal", "datetime", "six"] {
        writer.line(format!("import {module}"));
    }
    for module in &options.extra_imports {
        writer.line(format!("import {module}"));
    }
    writer.line("from avrogen import avrojson");
    if options.use_logical_types {
        writer.line("from avrogen import logical");
    }
    writer.line("from avro.io import DatumReader");
    writer.line("from avro.schema import RecordSchema, make_avsc_object");
    writer.line("from avro import schema as avro_schema");
    writer.line("from typing import Dict, List, Optional, Union");
}

/// `__read_file`, the lazily parsed schema registry and `_REGISTRY`.
///
/// Record classes resolve their schema through `_REGISTRY.lookup(fullname)`
/// on first use, reading `schema.avsc` next to the module.
pub fn write_registry(writer: &mut PythonWriter) {
    writer.block("def __read_file(file_name):", |w| {
        w.block("with open(file_name, \"r\") as f:", |w| w.line("return f.read()"));
    });
    writer.blank();
    writer.blank();
    writer.block("class _SchemaRegistry(object):", |w| {
        w.line("\"\"\"Named schemas of the document, parsed on first lookup.\"\"\"");
        w.blank();
        w.block("def __init__(self, load_text):", |w| {
            w.line("self._load_text = load_text");
            w.line("self._schemas = None");
        });
        w.blank();
        w.block("def lookup(self, fullname: str) -> RecordSchema:", |w| {
            w.block("if self._schemas is None:", |w| {
                w.line("names = avro_schema.Names()");
                w.line("make_avsc_object(json.loads(self._load_text()), names)");
                w.line("self._schemas = dict((n.fullname.lstrip(\".\"), n) for n in six.itervalues(names.names))");
            });
            w.line("return self._schemas[fullname.lstrip(\".\")]");
        });
    });
    writer.blank();
    writer.blank();
    writer.line(
        "_REGISTRY = _SchemaRegistry(lambda: __read_file(os.path.join(os.path.dirname(__file__), \"schema.avsc\")))",
    );
}
