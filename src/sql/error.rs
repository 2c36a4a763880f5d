//! Errors from binding adapted parameters onto SQLite statements

use crate::registry::AdaptError;
use thiserror::Error;

/// Errors that can occur while binding parameters
#[derive(Debug, Error)]
pub enum BindError {
    #[error(transparent)]
    Adapt(#[from] AdaptError),

    #[error("error binding parameter {index}: type '{type_name}' is not supported")]
    Unsupported {
        index: usize,
        type_name: &'static str,
    },

    #[error("incorrect number of bindings supplied: statement uses {expected}, {given} supplied")]
    ParameterCount { expected: usize, given: usize },

    #[error("you did not supply a value for binding parameter :{name}")]
    MissingParameter { name: String },

    #[error("binding {index} has no name, but named parameters were supplied")]
    UnnamedParameter { index: usize },

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for binding operations
pub type BindResult<T> = Result<T, BindError>;
