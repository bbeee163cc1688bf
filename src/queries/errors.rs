//! # Executor Errors

use thiserror::Error;

use crate::query::ValidationError;
use crate::store::StoreError;

/// Result type for fixed-query executors
pub type ExecResult<T> = Result<T, ExecError>;

/// Either the input was rejected or the store failed
#[derive(Debug, Error)]
pub enum ExecError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
