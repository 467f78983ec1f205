//! Python class generation for records and enums.
//!
//! Records become plain classes that own a private `_inner_dict` keyed by
//! wire field name, with one property per field. Enums become `str`
//! subclasses with one constant per symbol.

use crate::context::GenContext;
use crate::defaults::{DefaultExpression, find_type_of_default, is_constructor_default, resolve_default};
use crate::naming::{class_name, class_ref, docstring, namespace_segments, py_str, python_safe_name, split_fullname};
use crate::type_names::type_name_of;
use crate::writer::PythonWriter;
use avrobind_core::{EnumSchema, GenResult, RecordSchema, clean_fullname};
use indexmap::IndexMap;

/// A generated class, as emitted
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedClass {
    /// Fullname of the schema type, without a leading dot.
    pub fullname: String,

    /// Namespace segments, outermost first.
    pub namespace: Vec<String>,

    /// Class name (`UserClass`).
    pub class_name: String,

    /// Attribute path from the module root (`com.acme.UserClass`).
    pub class_ref: String,

    pub doc: Option<String>,

    pub kind: GeneratedKind,
}

/// What a [`GeneratedClass`] holds
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedKind {
    /// Fields in declared order.
    Record { fields: Vec<GeneratedField> },

    Enum {
        symbols: Vec<String>,
        symbol_docs: IndexMap<String, String>,
    },
}

/// One field of a generated record
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedField {
    /// Wire name, the key in `_inner_dict`.
    pub name: String,

    /// Property and parameter name.
    pub accessor: String,

    /// Type annotation; empty when the type maps to nothing.
    pub annotation: String,

    pub default: DefaultExpression,

    /// The default type is `null`.
    pub nullable: bool,

    /// Parameter is optional and moves behind the required ones.
    pub constructor_default: bool,

    /// The field has a declared default in the schema.
    pub declared_default: Option<serde_json::Value>,

    pub doc: Option<String>,
}

impl GeneratedClass {
    pub fn is_record(&self) -> bool {
        matches!(self.kind, GeneratedKind::Record { .. })
    }

    /// Fields of a record class; empty for enums.
    pub fn fields(&self) -> &[GeneratedField] {
        match &self.kind {
            GeneratedKind::Record { fields } => fields,
            GeneratedKind::Enum { .. } => &[],
        }
    }
}

/// Resolve annotations and defaults of every field of `record`.
pub fn build_record(record: &RecordSchema, ctx: &GenContext<'_>) -> GenResult<GeneratedClass> {
    let fullname = clean_fullname(&record.fullname).to_string();
    let mut fields = Vec::with_capacity(record.fields.len());
    for field in &record.fields {
        let (_, nullable) = find_type_of_default(&field.schema, ctx)?;
        fields.push(GeneratedField {
            name: field.name.clone(),
            accessor: python_safe_name(&field.name),
            annotation: type_name_of(&field.schema, ctx)?,
            default: resolve_default(field, &fullname, ctx)?,
            nullable,
            constructor_default: is_constructor_default(field, ctx)?,
            declared_default: field.default.clone(),
            doc: field.doc.clone(),
        });
    }
    Ok(class_shell(&fullname, record.doc.clone(), GeneratedKind::Record { fields }))
}

pub fn build_enum(schema: &EnumSchema) -> GeneratedClass {
    class_shell(
        clean_fullname(&schema.fullname),
        schema.doc.clone(),
        GeneratedKind::Enum {
            symbols: schema.symbols.clone(),
            symbol_docs: schema.symbol_docs.clone(),
        },
    )
}

fn class_shell(fullname: &str, doc: Option<String>, kind: GeneratedKind) -> GeneratedClass {
    let (namespace, short_name) = split_fullname(fullname);
    GeneratedClass {
        fullname: fullname.to_string(),
        namespace: namespace_segments(namespace),
        class_name: class_name(short_name),
        class_ref: class_ref(fullname),
        doc,
        kind,
    }
}

/// Emit the class for `record` at the writer's current scope.
pub fn emit_record(
    record: &RecordSchema,
    ctx: &GenContext<'_>,
    writer: &mut PythonWriter,
) -> GenResult<GeneratedClass> {
    let class = build_record(record, ctx)?;
    write_class(&class, writer);
    tracing::debug!(class = %class.class_ref, fields = class.fields().len(), "emitted record class");
    Ok(class)
}

/// Emit the class for `schema` at the writer's current scope.
pub fn emit_enum(schema: &EnumSchema, writer: &mut PythonWriter) -> GeneratedClass {
    let class = build_enum(schema);
    write_class(&class, writer);
    tracing::debug!(class = %class.class_ref, "emitted enum class");
    class
}

/// Write an already-built class.
pub fn write_class(class: &GeneratedClass, writer: &mut PythonWriter) {
    match &class.kind {
        GeneratedKind::Record { fields } => write_record(class, fields, writer),
        GeneratedKind::Enum { symbols, symbol_docs } => {
            write_enum(class, symbols, symbol_docs, writer)
        }
    }
}

fn write_record(class: &GeneratedClass, fields: &[GeneratedField], writer: &mut PythonWriter) {
    let self_type = py_str(&class.class_ref);
    writer.block(format!("class {}(object):", class.class_name), |w| {
        w.line(docstring(class.doc.as_deref()));
        w.blank();
        write_init(fields, w);
        w.blank();

        w.line("@classmethod");
        w.block("def record_schema(cls) -> RecordSchema:", |w| {
            w.line(format!("return _REGISTRY.lookup({})", py_str(&class.fullname)));
        });
        w.blank();

        w.line("@classmethod");
        w.block(format!("def construct(cls, inner: Dict[str, object]) -> {self_type}:"), |w| {
            w.line("self = cls.__new__(cls)");
            w.line("self._inner_dict = dict(inner)");
            w.line("return self");
        });
        w.blank();

        w.line("@classmethod");
        w.block(format!("def construct_with_defaults(cls) -> {self_type}:"), |w| {
            w.line("self = cls.__new__(cls)");
            w.line("self._inner_dict = {}");
            w.line("self._restore_defaults()");
            w.line("return self");
        });
        w.blank();

        w.block("def _restore_defaults(self) -> None:", |w| {
            if fields.is_empty() {
                w.line("pass");
            }
            for field in fields {
                w.line(format!("self.{} = {}", field.accessor, field.default.render()));
            }
        });
        w.blank();

        w.block("def to_dict(self) -> Dict[str, object]:", |w| {
            w.line("return dict(self._inner_dict)");
        });
        w.blank();

        w.block("def __eq__(self, other: object) -> bool:", |w| {
            w.line("return type(self) is type(other) and self._inner_dict == other._inner_dict  # type: ignore");
        });
        w.blank();

        w.block("def __repr__(self) -> str:", |w| {
            w.line(format!("return {} % (self._inner_dict,)", py_str(&format!("{}(%r)", class.class_ref))));
        });

        for field in fields {
            w.blank();
            write_property(field, w);
        }
    });
}

/// `__init__`: required parameters first, then every constructor-defaulted
/// one with `None` as the unset marker.
fn write_init(fields: &[GeneratedField], writer: &mut PythonWriter) {
    writer.line("def __init__(self,");
    writer.indent();
    for field in fields.iter().filter(|f| !f.constructor_default) {
        writer.line(format!("{},", parameter(&field.accessor, &field.annotation)));
    }
    for field in fields.iter().filter(|f| f.constructor_default) {
        let annotation = if field.nullable || field.annotation.is_empty() {
            field.annotation.clone()
        } else {
            format!("Optional[{}]", field.annotation)
        };
        writer.line(format!("{}=None,", parameter(&field.accessor, &annotation)));
    }
    writer.dedent();
    writer.block("):", |w| {
        w.line("self._inner_dict = {}");
        for field in fields {
            write_assignment(field, w);
        }
    });
}

fn write_assignment(field: &GeneratedField, writer: &mut PythonWriter) {
    let name = &field.accessor;
    match &field.declared_default {
        Some(declared) if !field.nullable => {
            writer.block(format!("if {name} is None:"), |w| {
                w.line(format!("# default: {declared}"));
                w.line(format!("self.{name} = {}", field.default.render()));
            });
            writer.block("else:", |w| w.line(format!("self.{name} = {name}")));
        }
        _ => writer.line(format!("self.{name} = {name}")),
    }
}

fn write_property(field: &GeneratedField, writer: &mut PythonWriter) {
    let name = &field.accessor;
    let returns = if field.annotation.is_empty() {
        String::new()
    } else {
        format!(" -> {}", field.annotation)
    };
    let key = py_str(&field.name);

    writer.line("@property");
    writer.block(format!("def {name}(self){returns}:"), |w| {
        w.line(docstring(field.doc.as_deref()));
        w.line(format!("return self._inner_dict.get({key})  # type: ignore"));
    });
    writer.blank();
    writer.line(format!("@{name}.setter"));
    writer.block(format!("def {name}(self, {}) -> None:", parameter("value", &field.annotation)), |w| {
        w.line(format!("self._inner_dict[{key}] = value"));
    });
}

fn parameter(name: &str, annotation: &str) -> String {
    if annotation.is_empty() {
        name.to_string()
    } else {
        format!("{name}: {annotation}")
    }
}

/// Enum symbols become constants; symbol docs sit directly below the symbol.
fn write_enum(
    class: &GeneratedClass,
    symbols: &[String],
    symbol_docs: &IndexMap<String, String>,
    writer: &mut PythonWriter,
) {
    writer.block(format!("class {}(str):", class.class_name), |w| {
        w.line(docstring(class.doc.as_deref()));
        w.blank();
        if symbols.is_empty() {
            w.line("pass");
        }
        for symbol in symbols {
            w.line(format!("{} = {}", python_safe_name(symbol), py_str(symbol)));
            if let Some(doc) = symbol_docs.get(symbol) {
                w.line(docstring(Some(doc.as_str())));
            }
        }
    });
}

#[cfg(test)]
#[path = "emitter/emitter_tests.rs"]
mod emitter_tests;
