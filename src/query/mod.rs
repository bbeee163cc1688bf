//! # Query Construction
//!
//! Input validation and dynamic predicate assembly.
//!
//! - `validate` - numeric and date checks shared by every endpoint
//! - `predicate` - whitelisted filter conditions to a parameterized clause

pub mod de;
pub mod errors;
pub mod predicate;
pub mod validate;

pub use errors::{QueryResult, ValidationError};
pub use predicate::{
    build, AssembledPredicate, ComparisonOperator, Connector, FilterCondition, OrderField,
};
pub use validate::{
    is_numeric, is_valid_date, parse_date, parse_integral, require_integer, require_numeric,
};
