//! haulbase - HTTP gateway over a relational logistics database
//!
//! - `query` - input validation and the dynamic predicate builder
//! - `auth` - role-dispatched credential resolution
//! - `store` - pooled PostgreSQL access behind the `Store` trait
//! - `queries` - fixed parameterized statements
//! - `http_server` - JSON endpoints
//! - `cli` - serve / init / check commands

pub mod auth;
pub mod cli;
pub mod http_server;
pub mod observability;
pub mod queries;
pub mod query;
pub mod store;
