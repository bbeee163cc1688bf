//! Store configuration
//!
//! Connection and pool settings for PostgreSQL. Secrets may be supplied via
//! `HAULBASE_DB_*` environment variables, which win over the config file.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Database connection and pool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_dbname")]
    pub dbname: String,

    #[serde(default = "default_user")]
    pub user: String,

    #[serde(default, skip_serializing)]
    pub password: String,

    /// Connections opened at startup (default: 1)
    #[serde(default = "default_pool_min")]
    pub pool_min: usize,

    /// Upper bound on open connections (default: 3)
    #[serde(default = "default_pool_max")]
    pub pool_max: usize,

    /// How long a request queues for a connection (default: 60s)
    #[serde(default = "default_pool_timeout_secs")]
    pub pool_timeout_secs: u64,

    /// SQL script run by `init` and `POST /initiate-tables`
    #[serde(default = "default_init_script")]
    pub init_script: PathBuf,

    /// Caller-side limit for the whole initialization (default: 10s)
    #[serde(default = "default_init_timeout_ms")]
    pub init_timeout_ms: u64,

    /// Caller-side limit for the initialization commit (default: 5s)
    #[serde(default = "default_commit_timeout_ms")]
    pub commit_timeout_ms: u64,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5432
}

fn default_dbname() -> String {
    "logistics".to_string()
}

fn default_user() -> String {
    "postgres".to_string()
}

fn default_pool_min() -> usize {
    1
}

fn default_pool_max() -> usize {
    3
}

fn default_pool_timeout_secs() -> u64 {
    60
}

fn default_init_script() -> PathBuf {
    PathBuf::from("./initialization.sql")
}

fn default_init_timeout_ms() -> u64 {
    10_000
}

fn default_commit_timeout_ms() -> u64 {
    5_000
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            dbname: default_dbname(),
            user: default_user(),
            password: String::new(),
            pool_min: default_pool_min(),
            pool_max: default_pool_max(),
            pool_timeout_secs: default_pool_timeout_secs(),
            init_script: default_init_script(),
            init_timeout_ms: default_init_timeout_ms(),
            commit_timeout_ms: default_commit_timeout_ms(),
        }
    }
}

impl StoreConfig {
    /// Overlay `HAULBASE_DB_*` environment variables
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| std::env::var(key).ok());
    }

    fn apply_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("HAULBASE_DB_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("HAULBASE_DB_PORT").and_then(|p| p.parse().ok()) {
            self.port = port;
        }
        if let Some(dbname) = lookup("HAULBASE_DB_NAME") {
            self.dbname = dbname;
        }
        if let Some(user) = lookup("HAULBASE_DB_USER") {
            self.user = user;
        }
        if let Some(password) = lookup("HAULBASE_DB_PASSWORD") {
            self.password = password;
        }
    }

    /// Check pool bounds
    pub fn validate(&self) -> Result<(), String> {
        if self.pool_min == 0 {
            return Err("pool_min must be >= 1".to_string());
        }
        if self.pool_max < self.pool_min {
            return Err(format!(
                "pool_max ({}) must be >= pool_min ({})",
                self.pool_max, self.pool_min
            ));
        }
        if self.port == 0 {
            return Err("store port must be > 0".to_string());
        }
        Ok(())
    }

    pub fn pool_timeout(&self) -> Duration {
        Duration::from_secs(self.pool_timeout_secs)
    }

    pub fn init_timeout(&self) -> Duration {
        Duration::from_millis(self.init_timeout_ms)
    }

    pub fn commit_timeout(&self) -> Duration {
        Duration::from_millis(self.commit_timeout_ms)
    }
}
