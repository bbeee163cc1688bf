//! # Query Errors
//!
//! Validation failures raised while turning client input into SQL.

use thiserror::Error;

/// Result type for query construction
pub type QueryResult<T> = Result<T, ValidationError>;

/// Input validation errors
///
/// Every variant is detected before any store access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Field is not in the filterable column whitelist
    #[error("Invalid field: {0}")]
    InvalidField(String),

    /// Comparison operator is not in the operator whitelist
    #[error("Invalid operator: {0}")]
    InvalidOperator(String),

    /// Logical connector is not AND, OR or NONE
    #[error("Invalid logical operator: {0}")]
    InvalidConnector(String),

    /// Value could not be parsed as a calendar date
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Value for a numeric column is not a number
    #[error("{field} must be a valid number, got '{value}'")]
    NotNumeric { field: String, value: String },

    /// Value for a whole-number column has a fractional part
    #[error("{field} must be a whole number, got '{value}'")]
    NotInteger { field: String, value: String },

    /// Operator cannot be applied to this field
    #[error("Operator {operator} is not supported for {field}")]
    UnsupportedOperator { field: String, operator: String },

    /// Condition list was empty
    #[error("No conditions provided")]
    NoConditions,

    /// Required input missing
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Projection column is not in the whitelist
    #[error("Invalid projection field: {0}")]
    InvalidProjection(String),
}
