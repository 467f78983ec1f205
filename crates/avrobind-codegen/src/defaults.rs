//! Default value resolution.
//!
//! Every field gets a [`DefaultExpression`], decided once at generation time.
//! The expression is used by the generated constructor when the caller leaves
//! a defaulted parameter unset, and by `_restore_defaults`, which reassigns
//! every field.
//!
//! Resolution first finds the *default type* of the field: unions defer to
//! their first alternative, always, and the field is nullable only if that
//! type is the primitive `null`. A declared default then wins where a rule
//! exists for the default type; everything else falls through to a
//! zero value for the type.

use crate::context::GenContext;
use crate::naming::{class_ref, py_str, python_safe_name};
use crate::type_names::primitive_type_name;
use avrobind_core::{Field, GenError, GenResult, Primitive, SchemaKind, SchemaNode, clean_fullname};
use serde_json::Value;
use std::collections::HashSet;

/// How a field is populated when no value is supplied
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultExpression {
    /// Zero value of a primitive (`str()`, `int()`, ...; `None` for `null`)
    PrimitiveZero(Primitive),

    /// First declared symbol of an enum
    EnumFirstSymbol { fullname: String, symbol: String },

    EmptyMap,

    EmptySequence,

    /// Zero-length value of a fixed type
    EmptyBytes,

    NullLiteral,

    /// Initializer expression supplied by a logical type plugin
    LogicalInitializer {
        logical_type: String,
        expression: String,
    },

    /// Instance of a record built from its own field defaults
    RecordAllDefaults { fullname: String },

    /// The declared default, used as-is
    DeclaredDefaultDirect { field: String, value: Value },

    /// The declared default, decoded structurally against the field type
    DeclaredDefaultViaJson { field: String, value: Value },
}

impl DefaultExpression {
    /// Python expression producing the default, evaluated inside an instance method.
    pub fn render(&self) -> String {
        match self {
            DefaultExpression::PrimitiveZero(Primitive::Null) => "None".to_string(),
            DefaultExpression::PrimitiveZero(primitive) => {
                format!("{}()", primitive_type_name(*primitive))
            }
            DefaultExpression::EnumFirstSymbol { fullname, symbol } => {
                format!("{}.{}", class_ref(fullname), python_safe_name(symbol))
            }
            DefaultExpression::EmptyMap => "dict()".to_string(),
            DefaultExpression::EmptySequence => "list()".to_string(),
            DefaultExpression::EmptyBytes => "bytes()".to_string(),
            DefaultExpression::NullLiteral => "None".to_string(),
            DefaultExpression::LogicalInitializer { expression, .. } => expression.clone(),
            DefaultExpression::RecordAllDefaults { fullname } => {
                format!("{}.construct_with_defaults()", class_ref(fullname))
            }
            DefaultExpression::DeclaredDefaultDirect { field, .. } => declared_default(field),
            DefaultExpression::DeclaredDefaultViaJson { field, .. } => declared_default_via_json(field),
        }
    }
}

/// Python expression reading a field's declared default from the record schema.
fn declared_default(field: &str) -> String {
    format!("self.record_schema().fields_dict[{}].default", py_str(field))
}

/// Python expression decoding a field's declared default against its type.
fn declared_default_via_json(field: &str) -> String {
    format!(
        "_json_converter.from_json_object({}, writers_schema=self.record_schema().fields_dict[{}].type)",
        declared_default(field),
        py_str(field)
    )
}

/// The type a field's default is drawn from, and whether that type is `null`.
///
/// Unions always defer to their first alternative, even when a later
/// alternative is `null`.
pub fn find_type_of_default<'a>(
    node: &'a SchemaNode,
    ctx: &GenContext<'a>,
) -> GenResult<(&'a SchemaNode, bool)> {
    match &node.kind {
        SchemaKind::Union(alternatives) => match alternatives.first() {
            Some(first) => find_type_of_default(first, ctx),
            None => Ok((node, false)),
        },
        SchemaKind::Named(_) => find_type_of_default(ctx.resolve(node)?, ctx),
        SchemaKind::Primitive(primitive) => Ok((node, *primitive == Primitive::Null)),
        _ => Ok((node, false)),
    }
}

/// Resolve the default expression of `field`, declared on record `record`.
pub fn resolve_default(
    field: &Field,
    record: &str,
    ctx: &GenContext<'_>,
) -> GenResult<DefaultExpression> {
    let (default_type, nullable) = find_type_of_default(&field.schema, ctx)?;
    let logical = ctx.logical_type(default_type);
    let is_record = matches!(default_type.kind, SchemaKind::Record(_));

    if let Some(value) = &field.default {
        if let Some(mapping) = logical {
            let raw = if is_record {
                declared_default_via_json(&field.name)
            } else {
                declared_default(&field.name)
            };
            return Ok(DefaultExpression::LogicalInitializer {
                logical_type: default_type.logical_type.clone().unwrap_or_default(),
                expression: mapping.convert(&raw),
            });
        }
        match &default_type.kind {
            SchemaKind::Record(_) => {
                return Ok(DefaultExpression::DeclaredDefaultViaJson {
                    field: field.name.clone(),
                    value: value.clone(),
                });
            }
            SchemaKind::Primitive(_) | SchemaKind::Enum(_) | SchemaKind::Fixed(_) => {
                return Ok(DefaultExpression::DeclaredDefaultDirect {
                    field: field.name.clone(),
                    value: value.clone(),
                });
            }
            _ => {
                tracing::debug!(
                    record,
                    field = %field.name,
                    "declared default has no rule for its type; using the type's zero value"
                );
            }
        }
    }

    if nullable {
        return Ok(DefaultExpression::NullLiteral);
    }
    if let Some(mapping) = logical {
        return Ok(DefaultExpression::LogicalInitializer {
            logical_type: default_type.logical_type.clone().unwrap_or_default(),
            expression: mapping.initializer.clone(),
        });
    }

    match &default_type.kind {
        SchemaKind::Primitive(primitive) if default_type.logical_type.is_none() => {
            Ok(DefaultExpression::PrimitiveZero(*primitive))
        }
        SchemaKind::Enum(e) => match e.symbols.first() {
            Some(symbol) => Ok(DefaultExpression::EnumFirstSymbol {
                fullname: clean_fullname(&e.fullname).to_string(),
                symbol: symbol.clone(),
            }),
            None => Err(no_default(record, field)),
        },
        SchemaKind::Map(_) => Ok(DefaultExpression::EmptyMap),
        SchemaKind::Array(_) => Ok(DefaultExpression::EmptySequence),
        SchemaKind::Fixed(_) => Ok(DefaultExpression::EmptyBytes),
        SchemaKind::Record(r) => Ok(DefaultExpression::RecordAllDefaults {
            fullname: clean_fullname(&r.fullname).to_string(),
        }),
        // An annotated primitive without an active mapping has no zero value.
        SchemaKind::Primitive(_) | SchemaKind::Union(_) | SchemaKind::Named(_) => {
            Err(no_default(record, field))
        }
    }
}

/// Whether the field's constructor parameter is optional.
///
/// Nullable fields and fields with a declared default move behind the
/// required parameters and accept `None` as "unset".
pub fn is_constructor_default(field: &Field, ctx: &GenContext<'_>) -> GenResult<bool> {
    let (_, nullable) = find_type_of_default(&field.schema, ctx)?;
    Ok(nullable || field.has_default())
}

/// Reject records whose all-defaults construction would reach themselves
/// again through a chain of [`DefaultExpression::RecordAllDefaults`] fields.
pub fn ensure_acyclic_defaults(fullname: &str, ctx: &GenContext<'_>) -> GenResult<()> {
    let mut stack = vec![clean_fullname(fullname).to_string()];
    let mut verified = HashSet::new();
    walk_record_defaults(ctx, &mut stack, &mut verified)
}

fn walk_record_defaults(
    ctx: &GenContext<'_>,
    stack: &mut Vec<String>,
    verified: &mut HashSet<String>,
) -> GenResult<()> {
    let Some(current) = stack.last().cloned() else {
        return Ok(());
    };
    let record = ctx.registry.record(&current)?;

    for field in &record.fields {
        let DefaultExpression::RecordAllDefaults { fullname } =
            resolve_default(field, &current, ctx)?
        else {
            continue;
        };
        if let Some(start) = stack.iter().position(|name| *name == fullname) {
            let mut path = stack[start..].to_vec();
            path.push(fullname);
            return Err(GenError::DefaultCycle { path });
        }
        if verified.contains(&fullname) {
            continue;
        }
        stack.push(fullname.clone());
        walk_record_defaults(ctx, stack, verified)?;
        stack.pop();
        verified.insert(fullname);
    }
    Ok(())
}

fn no_default(record: &str, field: &Field) -> GenError {
    GenError::NoDefaultResolvable {
        record: record.to_string(),
        field: field.name.clone(),
    }
}
