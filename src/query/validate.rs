//! Shared input validators.
//!
//! Gate identifiers, amounts and dates before they reach the predicate
//! builder, the credential resolver or a fixed statement.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::errors::{QueryResult, ValidationError};

/// Returns true when `value` parses as a finite number.
///
/// Surrounding whitespace is ignored. Empty strings, `NaN` and infinities
/// are rejected.
pub fn is_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }
    trimmed.parse::<f64>().map(f64::is_finite).unwrap_or(false)
}

/// Trimmed `value` when numeric, `NotNumeric` naming `field` otherwise
pub fn require_numeric<'a>(field: &str, value: &'a str) -> QueryResult<&'a str> {
    if is_numeric(value) {
        Ok(value.trim())
    } else {
        Err(ValidationError::NotNumeric {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

/// Whole-number value of `value`.
///
/// Accepts any numeric spelling of an integer, such as `5.0` or `1e3`;
/// fractional values and anything outside `i64` give `None`.
pub fn parse_integral(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return Some(n);
    }

    let decimal = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()?;
    if decimal.fract().is_zero() {
        decimal.to_i64()
    } else {
        None
    }
}

/// Trimmed `value` when it is a whole number.
///
/// Non-numbers are `NotNumeric`, fractional numbers `NotInteger`.
pub fn require_integer<'a>(field: &str, value: &'a str) -> QueryResult<&'a str> {
    let trimmed = require_numeric(field, value)?;
    if parse_integral(trimmed).is_none() {
        return Err(ValidationError::NotInteger {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    Ok(trimmed)
}

/// Parse a client date as a UTC wall-clock timestamp.
///
/// Accepts `YYYY-MM-DD` (midnight), RFC 3339 datetimes (converted to UTC)
/// and offset-less `YYYY-MM-DDTHH:MM:SS` (taken as UTC).
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(datetime.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
}

/// Returns true when `value` is a valid calendar date.
pub fn is_valid_date(value: &str) -> bool {
    parse_date(value).is_some()
}
