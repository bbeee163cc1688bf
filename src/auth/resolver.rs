//! # Credential Resolver
//!
//! Looks a user up by identifier and secret in the table for their role and
//! returns a normalized user record.
//!
//! Credentials are stored and compared in plaintext by the schema this
//! service fronts; hardening that is outside this module.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use super::errors::{AuthError, AuthResult};
use super::role::{Role, ID_COLUMN, NAME_COLUMN};
use crate::query::require_integer;
use crate::store::{Row, SqlValue, Store};

/// A logged-in user, as returned to the browser
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRecord {
    pub id: Value,
    pub name: Value,
    /// Role-specific attributes, keyed like `contactNumber`
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Result of a credential lookup
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    Authenticated(UserRecord),
    /// No match, or the lookup failed. Deliberately indistinguishable.
    Rejected,
}

/// Resolves credentials against the role tables
pub struct CredentialResolver {
    store: Arc<dyn Store>,
}

impl CredentialResolver {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Resolve a raw role tag.
    ///
    /// Role and identifier are validated before any query is issued.
    pub async fn resolve(
        &self,
        identifier: &str,
        secret: &str,
        role_tag: &str,
    ) -> AuthResult<LoginOutcome> {
        let role: Role = role_tag.parse()?;
        self.resolve_role(identifier, secret, role).await
    }

    /// Resolve for an already-parsed role
    pub async fn resolve_role(
        &self,
        identifier: &str,
        secret: &str,
        role: Role,
    ) -> AuthResult<LoginOutcome> {
        let identifier =
            require_integer(ID_COLUMN, identifier).map_err(|_| AuthError::InvalidIdentifier)?;

        let params = [SqlValue::text(identifier), SqlValue::text(secret)];
        let rows = match self.store.query_rows(&role.lookup_sql(), &params).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(
                    event = "LOGIN_LOOKUP_FAILED",
                    role = role.as_str(),
                    error = %e
                );
                return Ok(LoginOutcome::Rejected);
            }
        };

        match rows.first() {
            Some(row) => {
                tracing::info!(event = "LOGIN_SUCCEEDED", role = role.as_str());
                Ok(LoginOutcome::Authenticated(normalize(row, role)))
            }
            None => {
                tracing::info!(event = "LOGIN_REJECTED", role = role.as_str());
                Ok(LoginOutcome::Rejected)
            }
        }
    }
}

/// Column lookup tolerant of PostgreSQL's lowercase folding
fn column<'a>(row: &'a Row, name: &str) -> Option<&'a Value> {
    row.get(name).or_else(|| {
        row.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    })
}

fn normalize(row: &Row, role: Role) -> UserRecord {
    let attributes = role
        .profile()
        .attributes
        .iter()
        .map(|name| {
            let value = column(row, name).cloned().unwrap_or(Value::Null);
            (name.to_string(), value)
        })
        .collect();

    UserRecord {
        id: column(row, ID_COLUMN).cloned().unwrap_or(Value::Null),
        name: column(row, NAME_COLUMN).cloned().unwrap_or(Value::Null),
        attributes,
    }
}
