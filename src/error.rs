//! Error types for the filter query engine

use crate::condition::Operator;
use crate::registry::FieldKind;
use thiserror::Error;

/// Main error type for the filter query engine
///
/// Only registry configuration and `FilterSet` editing can fail. Compiling
/// conditions never does: malformed input degrades to an excluded condition.
#[derive(Error, Debug)]
pub enum FilterQueryError {
    #[error("Duplicate field: {0}")]
    DuplicateField(String),

    #[error("Field declares no operators: {0}")]
    EmptyOperators(String),

    #[error("Operator {operator} is not supported by {kind} field {field}")]
    UnsupportedOperator {
        field: String,
        operator: Operator,
        kind: FieldKind,
    },

    #[error("Operator {operator} declared twice for field {field}")]
    RepeatedOperator { field: String, operator: Operator },

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Duplicate condition id: {0}")]
    DuplicateCondition(String),

    #[error("Condition not found: {0}")]
    ConditionNotFound(String),
}

impl From<serde_json::Error> for FilterQueryError {
    fn from(err: serde_json::Error) -> Self {
        FilterQueryError::Deserialization(err.to_string())
    }
}

/// Result type alias for the filter query engine
pub type Result<T> = std::result::Result<T, FilterQueryError>;
