//! # Auth Errors
//!
//! Error types for credential resolution.

use thiserror::Error;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Credential resolution errors
///
/// Store failures never appear here: the resolver logs them and reports a
/// plain rejection so callers cannot tell them apart from bad credentials.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Role tag is not customer, supplier or carrier
    #[error("Invalid user type: {0}")]
    InvalidRole(String),

    /// Identifier is not a whole number
    #[error("userId must be a whole number")]
    InvalidIdentifier,

    /// Identifier, secret or role missing
    #[error("Invalid input: userId, password, and userType are required.")]
    MissingInput,

    /// Generic rejection (don't leak which half was wrong)
    #[error("Invalid credentials")]
    InvalidCredentials,
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::InvalidRole(_) => 400,
            AuthError::InvalidIdentifier => 400,
            AuthError::MissingInput => 400,
            AuthError::InvalidCredentials => 401,
        }
    }

    /// Detected before any store access
    pub fn is_validation(&self) -> bool {
        self.status_code() == 400
    }
}
