//! In-process evaluation of generated defaults.
//!
//! Mirrors what the generated `construct_with_defaults()` does, producing
//! JSON values instead of Python objects. Used to check generated defaults
//! without a Python interpreter and as the source side of round trips
//! through an external codec.

use crate::context::GenContext;
use crate::defaults::{DefaultExpression, resolve_default};
use avrobind_core::{GenError, GenResult, Primitive, clean_fullname};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// A record value keyed by wire field name, in declared order
#[derive(Debug, Clone, PartialEq)]
pub struct RecordInstance {
    pub fullname: String,
    pub fields: IndexMap<String, Value>,
}

impl RecordInstance {
    pub fn new(fullname: impl Into<String>) -> Self {
        Self {
            fullname: clean_fullname(&fullname.into()).to_string(),
            fields: IndexMap::new(),
        }
    }

    /// Wrap a decoded JSON object, keeping its key order.
    pub fn from_json(fullname: impl Into<String>, raw: Value) -> GenResult<Self> {
        let fullname = fullname.into();
        let Value::Object(map) = raw else {
            return Err(GenError::InvalidSchema(format!(
                "expected a JSON object for record '{fullname}'"
            )));
        };
        let mut instance = Self::new(fullname);
        instance.fields.extend(map);
        Ok(instance)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .fields
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        Value::Object(map)
    }
}

/// A value reconstructed through the reader dispatch table
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    Record(RecordInstance),
    Enum { fullname: String, symbol: String },
}

/// Evaluates [`DefaultExpression`]s of a document's records
#[derive(Debug, Clone, Copy)]
pub struct DefaultMaterializer<'a> {
    ctx: GenContext<'a>,
}

impl<'a> DefaultMaterializer<'a> {
    pub fn new(ctx: GenContext<'a>) -> Self {
        Self { ctx }
    }

    /// Build a record from its field defaults, nested records included.
    ///
    /// Fails with [`GenError::HostExpression`] when a default only exists as
    /// Python source (logical type initializers and conversions).
    pub fn construct_with_defaults(&self, fullname: &str) -> GenResult<RecordInstance> {
        let mut stack = Vec::new();
        self.construct(fullname, &mut stack)
    }

    fn construct(&self, fullname: &str, stack: &mut Vec<String>) -> GenResult<RecordInstance> {
        let fullname = clean_fullname(fullname).to_string();
        if stack.contains(&fullname) {
            let mut path = stack.clone();
            path.push(fullname);
            return Err(GenError::DefaultCycle { path });
        }

        let record = self.ctx.registry.record(&fullname)?;
        stack.push(fullname.clone());
        let mut instance = RecordInstance::new(fullname.as_str());
        for field in &record.fields {
            let value = match resolve_default(field, &fullname, &self.ctx)? {
                DefaultExpression::RecordAllDefaults { fullname: nested } => {
                    self.construct(&nested, stack)?.to_json()
                }
                DefaultExpression::LogicalInitializer { .. } => {
                    return Err(GenError::HostExpression {
                        record: fullname.clone(),
                        field: field.name.clone(),
                    });
                }
                other => evaluate(&other),
            };
            instance.fields.insert(field.name.clone(), value);
        }
        stack.pop();
        Ok(instance)
    }
}

/// JSON value of a default that needs no record context.
fn evaluate(expression: &DefaultExpression) -> Value {
    match expression {
        DefaultExpression::PrimitiveZero(primitive) => primitive_zero(*primitive),
        DefaultExpression::EnumFirstSymbol { symbol, .. } => Value::String(symbol.clone()),
        DefaultExpression::EmptyMap => Value::Object(Map::new()),
        DefaultExpression::EmptySequence => Value::Array(Vec::new()),
        DefaultExpression::EmptyBytes => Value::String(String::new()),
        DefaultExpression::DeclaredDefaultDirect { value, .. }
        | DefaultExpression::DeclaredDefaultViaJson { value, .. } => value.clone(),
        DefaultExpression::NullLiteral
        | DefaultExpression::LogicalInitializer { .. }
        | DefaultExpression::RecordAllDefaults { .. } => Value::Null,
    }
}

/// Zero value of a primitive; bytes use the JSON string encoding.
fn primitive_zero(primitive: Primitive) -> Value {
    match primitive {
        Primitive::Null => Value::Null,
        Primitive::Boolean => Value::Bool(false),
        Primitive::Int | Primitive::Long => Value::from(0),
        Primitive::Float | Primitive::Double => Value::from(0.0),
        Primitive::Bytes | Primitive::String => Value::String(String::new()),
    }
}
