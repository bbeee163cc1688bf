//! # Bound Values
//!
//! Positional parameters handed to the store.
//!
//! Client input arrives as text. Rather than guessing column types up front,
//! a `SqlValue` encodes itself for whatever type PostgreSQL inferred for its
//! placeholder, so `orderNumber = $1` binds "17" as an integer and
//! `CAST(orderNumber AS TEXT) LIKE $1` binds "%17%" as text.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use bytes::BytesMut;
use chrono::{NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tokio_postgres::types::{to_sql_checked, IsNull, ToSql, Type};

use crate::query::parse_integral;

type EncodeResult = Result<IsNull, Box<dyn Error + Sync + Send>>;

/// A single positional parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    /// Client text, converted to the placeholder's inferred type on encode
    Text(String),
    /// UTC wall-clock timestamp
    Timestamp(NaiveDateTime),
    /// Text array, bound as `text[]`
    TextList(Vec<String>),
    /// SQL NULL of whatever type the placeholder has
    Null,
}

impl SqlValue {
    pub fn text(value: impl Into<String>) -> Self {
        SqlValue::Text(value.into())
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Text(text) => write!(f, "'{}'", text),
            SqlValue::Timestamp(ts) => write!(f, "{}", ts),
            SqlValue::TextList(items) => write!(f, "{:?}", items),
            SqlValue::Null => f.write_str("NULL"),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(SqlValue::Null)
    }
}

impl ToSql for SqlValue {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> EncodeResult
    where
        Self: Sized,
    {
        match self {
            SqlValue::Text(text) => encode_text(text, ty, out),
            SqlValue::Timestamp(ts) => match *ty {
                Type::DATE => ts.date().to_sql_checked(ty, out),
                Type::TIMESTAMPTZ => Utc.from_utc_datetime(ts).to_sql_checked(ty, out),
                _ => ts.to_sql_checked(ty, out),
            },
            SqlValue::TextList(items) => items.to_sql_checked(ty, out),
            SqlValue::Null => Ok(IsNull::Yes),
        }
    }

    fn accepts(_ty: &Type) -> bool
    where
        Self: Sized,
    {
        true
    }

    to_sql_checked!();
}

fn encode_text(text: &str, ty: &Type, out: &mut BytesMut) -> EncodeResult {
    let trimmed = text.trim();
    match *ty {
        Type::INT2 => i16::try_from(whole(trimmed)?)?.to_sql_checked(ty, out),
        Type::INT4 => i32::try_from(whole(trimmed)?)?.to_sql_checked(ty, out),
        Type::INT8 => whole(trimmed)?.to_sql_checked(ty, out),
        Type::FLOAT4 => trimmed.parse::<f32>()?.to_sql_checked(ty, out),
        Type::FLOAT8 => trimmed.parse::<f64>()?.to_sql_checked(ty, out),
        Type::NUMERIC => Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))?
            .to_sql_checked(ty, out),
        _ => text.to_sql_checked(ty, out),
    }
}

/// Integer placeholders take any whole-number spelling, `5.0` and `1e3` included
fn whole(text: &str) -> Result<i64, Box<dyn Error + Sync + Send>> {
    parse_integral(text).ok_or_else(|| format!("'{}' is not a whole number", text).into())
}
