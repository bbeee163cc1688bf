//! # Dynamic Predicate Builder
//!
//! Turns an ordered list of client filter conditions into one parameterized
//! WHERE clause over the order table.
//!
//! Field names and operators are spliced into the SQL text verbatim, so their
//! safety rests entirely on the exact-match whitelists below. Matching is
//! case-sensitive on purpose; do not relax it. Values never enter the SQL
//! text, they are bound as `$n` placeholders.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::de::string_or_number;
use super::errors::{QueryResult, ValidationError};
use super::validate::{parse_date, require_integer, require_numeric};
use crate::store::SqlValue;

/// Always-true prefix every assembled clause starts with
pub const BASE_PREDICATE: &str = "1=1 AND";

/// Wildcard marker for LIKE patterns
pub const WILDCARD: char = '%';

/// Hours added to every date filter before binding.
///
/// Dates are picked in a browser assumed to run seven hours behind the
/// stored values; shifting here keeps date filters matching.
pub const DATE_SHIFT_HOURS: i64 = 7;

/// Connector value meaning "no connector"
pub const NO_CONNECTOR: &str = "NONE";

/// What a filterable column holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Whole numbers only
    Integer,
    Decimal,
    Date,
}

/// Filterable order columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    OrderNumber,
    OrderDate,
    TotalCost,
    CustomerId,
    SupplierId,
}

impl OrderField {
    pub const ALL: [OrderField; 5] = [
        OrderField::OrderNumber,
        OrderField::OrderDate,
        OrderField::TotalCost,
        OrderField::CustomerId,
        OrderField::SupplierId,
    ];

    /// Exact-match lookup
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.column() == name)
    }

    /// Column name as written into SQL
    pub fn column(&self) -> &'static str {
        match self {
            OrderField::OrderNumber => "orderNumber",
            OrderField::OrderDate => "orderDate",
            OrderField::TotalCost => "totalCost",
            OrderField::CustomerId => "customerID",
            OrderField::SupplierId => "supplierID",
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            OrderField::OrderDate => ColumnKind::Date,
            OrderField::TotalCost => ColumnKind::Decimal,
            OrderField::OrderNumber | OrderField::CustomerId | OrderField::SupplierId => {
                ColumnKind::Integer
            }
        }
    }
}

/// Whitelisted comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    Eq,
    Gt,
    Lt,
    Gte,
    Lte,
    Like,
}

impl ComparisonOperator {
    pub const ALL: [ComparisonOperator; 6] = [
        ComparisonOperator::Eq,
        ComparisonOperator::Gt,
        ComparisonOperator::Lt,
        ComparisonOperator::Gte,
        ComparisonOperator::Lte,
        ComparisonOperator::Like,
    ];

    /// Exact-match lookup
    pub fn parse(op: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|candidate| candidate.as_sql() == op)
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "=",
            ComparisonOperator::Gt => ">",
            ComparisonOperator::Lt => "<",
            ComparisonOperator::Gte => ">=",
            ComparisonOperator::Lte => "<=",
            ComparisonOperator::Like => "LIKE",
        }
    }
}

/// Logical connector between consecutive conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    And,
    Or,
    /// Explicit no-op sentinel
    Skip,
}

impl Connector {
    /// Exact-match lookup
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "AND" => Some(Connector::And),
            "OR" => Some(Connector::Or),
            NO_CONNECTOR => Some(Connector::Skip),
            _ => None,
        }
    }

    fn as_sql(&self) -> Option<&'static str> {
        match self {
            Connector::And => Some("AND"),
            Connector::Or => Some("OR"),
            Connector::Skip => None,
        }
    }
}

/// One client filter condition, as sent by the browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCondition {
    pub field: String,
    pub comparison_operator: String,
    #[serde(deserialize_with = "string_or_number")]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical_operator: Option<String>,
}

impl FilterCondition {
    pub fn new(field: &str, comparison_operator: &str, value: &str) -> Self {
        Self {
            field: field.to_string(),
            comparison_operator: comparison_operator.to_string(),
            value: value.to_string(),
            logical_operator: None,
        }
    }

    /// Attach a logical connector
    pub fn joined_by(mut self, connector: &str) -> Self {
        self.logical_operator = Some(connector.to_string());
        self
    }
}

/// A parameterized boolean expression and its bound values
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledPredicate {
    /// SQL boolean expression using `$1..$n` placeholders
    pub clause: String,
    /// Bound values, in placeholder order
    pub params: Vec<SqlValue>,
}

impl AssembledPredicate {
    /// Number of `$n` placeholders in the clause
    pub fn placeholder_count(&self) -> usize {
        self.clause
            .match_indices('$')
            .filter(|(at, _)| {
                self.clause[at + 1..]
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_digit())
            })
            .count()
    }
}

/// Build a WHERE clause from conditions.
///
/// Fails on the first condition that names a field, operator or connector
/// outside the whitelists; nothing partial is returned.
///
/// A non-first condition without a connector is concatenated directly after
/// the previous one. The resulting SQL is malformed and the store rejects it.
/// It is unclear whether that leniency is wanted, so it is kept as observed.
pub fn build(conditions: &[FilterCondition]) -> QueryResult<AssembledPredicate> {
    if conditions.is_empty() {
        return Err(ValidationError::NoConditions);
    }

    let mut clause = String::from(BASE_PREDICATE);
    let mut params = Vec::with_capacity(conditions.len());

    for (index, condition) in conditions.iter().enumerate() {
        let field = OrderField::parse(&condition.field)
            .ok_or_else(|| ValidationError::InvalidField(condition.field.clone()))?;
        let operator = ComparisonOperator::parse(&condition.comparison_operator)
            .ok_or_else(|| ValidationError::InvalidOperator(condition.comparison_operator.clone()))?;
        let connector = match condition.logical_operator.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(
                Connector::parse(raw)
                    .ok_or_else(|| ValidationError::InvalidConnector(raw.to_string()))?,
            ),
        };

        let value = bind_value(field, operator, &condition.value)?;

        if index > 0 {
            if let Some(keyword) = connector.and_then(|c| c.as_sql()) {
                clause.push(' ');
                clause.push_str(keyword);
            }
        }

        params.push(value);
        clause.push(' ');
        clause.push_str(&comparison_sql(field, operator, params.len()));
    }

    Ok(AssembledPredicate { clause, params })
}

/// Render `field op $n`.
///
/// LIKE compares the column's text form so that numeric and date columns
/// can be substring-matched.
fn comparison_sql(field: OrderField, operator: ComparisonOperator, position: usize) -> String {
    match operator {
        ComparisonOperator::Like => {
            format!("CAST({} AS TEXT) LIKE ${}", field.column(), position)
        }
        _ => format!("{} {} ${}", field.column(), operator.as_sql(), position),
    }
}

fn bind_value(
    field: OrderField,
    operator: ComparisonOperator,
    raw: &str,
) -> QueryResult<SqlValue> {
    match (field.kind(), operator) {
        // Every date filter is parsed and shifted; a pattern cannot be.
        (ColumnKind::Date, ComparisonOperator::Like) => Err(ValidationError::UnsupportedOperator {
            field: field.column().to_string(),
            operator: operator.as_sql().to_string(),
        }),
        (_, ComparisonOperator::Like) => Ok(SqlValue::Text(wrap_wildcards(raw))),
        (ColumnKind::Date, _) => {
            let date = parse_date(raw).ok_or_else(|| ValidationError::InvalidDate(raw.to_string()))?;
            Ok(SqlValue::Timestamp(shift_date(date)))
        }
        (ColumnKind::Integer, _) => Ok(SqlValue::text(require_integer(field.column(), raw)?)),
        (ColumnKind::Decimal, _) => Ok(SqlValue::text(require_numeric(field.column(), raw)?)),
    }
}

/// Wrap in `%..%` unless the pattern already carries a wildcard
pub fn wrap_wildcards(value: &str) -> String {
    if value.contains(WILDCARD) {
        value.to_string()
    } else {
        format!("{WILDCARD}{value}{WILDCARD}")
    }
}

/// Apply the fixed date-filter offset
pub fn shift_date(date: NaiveDateTime) -> NaiveDateTime {
    date + Duration::hours(DATE_SHIFT_HOURS)
}
