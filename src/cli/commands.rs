//! CLI command implementations
//!
//! Each command loads the config, installs logging, then talks to the
//! database through a fresh pool that is closed before returning.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use crate::http_server::{GatewayState, HttpServer, HttpServerConfig, ScriptSettings};
use crate::observability::{init_logging, LoggingConfig};
use crate::queries;
use crate::store::{PgStore, Store, StoreConfig};

/// Configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpServerConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file, then overlay the environment
    pub fn load(path: &Path) -> CliResult<Self> {
        let mut config = Self::read(path)?;
        config.store.apply_env();
        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))
    }

    fn validate(&self) -> CliResult<()> {
        self.http.validate().map_err(CliError::config_error)?;
        self.store
            .validate()
            .map_err(|e| CliError::config_error(format!("store: {}", e)))
    }
}

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run a command on a fresh multi-threaded runtime
pub fn run_command(cmd: Command) -> CliResult<()> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    match cmd {
        Command::Serve { config } => rt.block_on(serve(&config)),
        Command::Init { config } => rt.block_on(init(&config)),
        Command::Check { config } => rt.block_on(check(&config)),
    }
}

/// Boot the pool and serve HTTP until SIGINT/SIGTERM.
///
/// An unreachable database is logged, not fatal; requests fail until it
/// comes back.
pub async fn serve(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    init_logging(&config.logging);

    let store = Arc::new(PgStore::connect(&config.store)?);
    match store.warm_up(config.store.pool_min).await {
        Ok(()) => tracing::info!(
            event = "POOL_READY",
            min = config.store.pool_min,
            max = config.store.pool_max
        ),
        Err(e) => tracing::warn!(event = "POOL_WARM_UP_FAILED", error = %e),
    }

    let state = Arc::new(GatewayState::new(
        store.clone(),
        ScriptSettings::from_config(&config.store),
    ));
    let server = HttpServer::with_config(config.http.clone(), state);

    let served = server
        .start(shutdown_signal())
        .await
        .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)));

    store.close();
    served
}

/// Run the initialization script once
pub async fn init(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    init_logging(&config.logging);

    let store = Arc::new(PgStore::connect(&config.store)?);
    let settings = ScriptSettings::from_config(&config.store);
    let result = queries::initialize_tables(
        store.clone(),
        &settings.path,
        settings.init_timeout,
        settings.commit_timeout,
    )
    .await;
    store.close();

    let report = result?;
    println!(
        "{}",
        json!({
            "executed": report.executed,
            "skipped_drops": report.skipped_drops,
        })
    );
    Ok(())
}

/// Acquire one connection and report
pub async fn check(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    init_logging(&config.logging);

    let store = PgStore::connect(&config.store)?;
    let result = store.ping().await;
    store.close();

    result?;
    println!("{}", crate::http_server::CONNECTED);
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(event = "SIGNAL_HANDLER_FAILED", error = %e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(event = "SIGNAL_HANDLER_FAILED", error = %e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!(event = "SHUTDOWN_REQUESTED");
}
