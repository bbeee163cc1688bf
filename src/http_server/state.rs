//! Shared router state.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::auth::CredentialResolver;
use crate::store::{Row, Store, StoreConfig};

/// Initialization script settings
#[derive(Debug, Clone)]
pub struct ScriptSettings {
    pub path: PathBuf,
    pub init_timeout: Duration,
    pub commit_timeout: Duration,
}

impl ScriptSettings {
    pub fn from_config(config: &StoreConfig) -> Self {
        Self {
            path: config.init_script.clone(),
            init_timeout: config.init_timeout(),
            commit_timeout: config.commit_timeout(),
        }
    }
}

/// State shared by every handler
pub struct GatewayState {
    pub store: Arc<dyn Store>,
    pub resolver: CredentialResolver,
    pub script: ScriptSettings,
}

impl GatewayState {
    pub fn new(store: Arc<dyn Store>, script: ScriptSettings) -> Self {
        Self {
            resolver: CredentialResolver::new(store.clone()),
            store,
            script,
        }
    }
}

/// `{success:true, data:[...]}`
#[derive(Debug, Serialize)]
pub struct DataResponse {
    pub success: bool,
    pub data: Vec<Row>,
}

impl DataResponse {
    pub fn rows(data: Vec<Row>) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// `{success:true}`
#[derive(Debug, Serialize)]
pub struct OutcomeResponse {
    pub success: bool,
}

impl OutcomeResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
