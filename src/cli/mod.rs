//! CLI module for Haulbase
//!
//! Provides command-line interface for:
//! - serve: Boot the pool and the HTTP gateway
//! - init: Run the initialization script
//! - check: Test database connectivity

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{check, init, run, run_command, serve, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
