//! Python type annotations for schema nodes.
//!
//! # Type Mappings
//!
//! | Schema | Python annotation |
//! |--------|-------------------|
//! | `null` | `None` |
//! | `boolean` | `bool` |
//! | `int`, `long` | `int` |
//! | `float`, `double` | `float` |
//! | `bytes`, `fixed` | `bytes` |
//! | `string` | `str` |
//! | record / enum `a.B` | `"a.BClass"` |
//! | `array<T>` | `List[T]` |
//! | `map<T>` | `Dict[str, T]` |
//! | `[A, B]` | `Union[A, B]` |
//!
//! A registered logical type overrides the structural mapping when logical
//! types are enabled.

use crate::context::GenContext;
use crate::naming::class_ref;
use avrobind_core::{GenResult, Primitive, SchemaKind, SchemaNode};

/// Map a schema node to its Python type annotation.
///
/// Unions collapse identical alternative names; a union whose alternatives
/// all map to nothing yields an empty annotation.
pub fn type_name_of(node: &SchemaNode, ctx: &GenContext<'_>) -> GenResult<String> {
    if let Some(mapping) = ctx.logical_type(node) {
        return Ok(mapping.type_name.clone());
    }

    let name = match &node.kind {
        SchemaKind::Primitive(primitive) => primitive_type_name(*primitive).to_string(),
        SchemaKind::Fixed(_) => "bytes".to_string(),
        SchemaKind::Enum(e) => quoted_class_ref(&e.fullname),
        SchemaKind::Record(r) => quoted_class_ref(&r.fullname),
        SchemaKind::Named(_) => return type_name_of(ctx.resolve(node)?, ctx),
        SchemaKind::Array(items) => format!("List[{}]", type_name_of(items, ctx)?),
        SchemaKind::Map(values) => format!("Dict[str, {}]", type_name_of(values, ctx)?),
        SchemaKind::Union(alternatives) => {
            let mut names: Vec<String> = Vec::with_capacity(alternatives.len());
            for alternative in alternatives {
                let name = type_name_of(alternative, ctx)?;
                if !name.is_empty() && !names.contains(&name) {
                    names.push(name);
                }
            }
            match names.len() {
                0 => String::new(),
                1 => names.remove(0),
                _ => format!("Union[{}]", names.join(", ")),
            }
        }
    };
    Ok(name)
}

/// Python type of a primitive.
pub fn primitive_type_name(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::Null => "None",
        Primitive::Boolean => "bool",
        Primitive::Int | Primitive::Long => "int",
        Primitive::Float | Primitive::Double => "float",
        Primitive::Bytes => "bytes",
        Primitive::String => "str",
    }
}

fn quoted_class_ref(fullname: &str) -> String {
    format!("\"{}\"", class_ref(fullname))
}

#[cfg(test)]
#[path = "type_names/type_names_tests.rs"]
mod type_names_tests;
