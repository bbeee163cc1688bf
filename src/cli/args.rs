//! CLI argument definitions using clap
//!
//! Commands:
//! - haulbase serve --config <path>
//! - haulbase init --config <path>
//! - haulbase check --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Haulbase - logistics database gateway
#[derive(Parser, Debug)]
#[command(name = "haulbase")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP gateway
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./haulbase.json")]
        config: PathBuf,
    },

    /// Run the initialization script once and exit
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./haulbase.json")]
        config: PathBuf,
    },

    /// Check database connectivity and exit
    Check {
        /// Path to configuration file
        #[arg(long, default_value = "./haulbase.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
