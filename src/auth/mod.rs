//! # Authentication Module
//!
//! Role-dispatched credential lookup.
//!
//! - `role` - the three roles and their tables/projections
//! - `resolver` - identifier + secret + role to a user record

pub mod errors;
pub mod resolver;
pub mod role;

pub use errors::{AuthError, AuthResult};
pub use resolver::{CredentialResolver, LoginOutcome, UserRecord};
pub use role::{Role, RoleProfile};
