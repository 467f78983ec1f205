//! Error types for avrobind generation runs

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for generation operations
pub type GenResult<T> = Result<T, GenError>;

/// Error type for generation operations
#[derive(Error, Debug)]
pub enum GenError {
    /// No default rule matches the field's resolved type
    #[error("cannot resolve a default for field '{field}' of '{record}'")]
    NoDefaultResolvable { record: String, field: String },

    /// Building a record from defaults would recurse into itself
    #[error("cyclic default construction: {}", path.join(" -> "))]
    DefaultCycle { path: Vec<String> },

    /// A named reference does not resolve in the registry
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// The schema document has a shape the loader cannot interpret
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// The default is a host-language expression and cannot be evaluated in-process
    #[error("default of field '{field}' of '{record}' is a host-language expression")]
    HostExpression { record: String, field: String },

    /// A name is not present in the reader dispatch table
    #[error("no generated class registered for '{0}'")]
    UnknownDispatchName(String),

    /// Writing an output unit failed
    #[error("cannot write output unit {path:?}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GenError {
    /// Process exit code used by the command-line front end.
    pub fn exit_code(&self) -> i32 {
        match self {
            GenError::NoDefaultResolvable { .. } | GenError::DefaultCycle { .. } => 3,
            GenError::UnknownType(_) | GenError::InvalidSchema(_) => 4,
            GenError::HostExpression { .. } | GenError::UnknownDispatchName(_) => 5,
            GenError::Output { .. } => 6,
            GenError::Serialization(_) => 7,
        }
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
