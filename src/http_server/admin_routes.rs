//! Admin HTTP Routes
//!
//! Connectivity check and schema initialization.

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    routing::{get, post},
    Router,
};

use super::errors::{ApiError, ApiResult};
use super::state::{GatewayState, OutcomeResponse};
use crate::queries;

/// Body of a successful connectivity check
pub const CONNECTED: &str = "connected";
/// Body of a failed connectivity check
pub const UNREACHABLE: &str = "unable to connect";

/// Admin routes
pub fn admin_routes(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route("/check-db-connection", get(check_handler))
        .route("/initiate-tables", post(initiate_handler))
        .with_state(state)
}

async fn check_handler(State(state): State<Arc<GatewayState>>) -> &'static str {
    match state.store.ping().await {
        Ok(()) => CONNECTED,
        Err(e) => {
            tracing::warn!(event = "CONNECTION_CHECK_FAILED", error = %e);
            UNREACHABLE
        }
    }
}

async fn initiate_handler(
    State(state): State<Arc<GatewayState>>,
) -> ApiResult<Json<OutcomeResponse>> {
    let script = &state.script;
    queries::initialize_tables(
        state.store.clone(),
        &script.path,
        script.init_timeout,
        script.commit_timeout,
    )
    .await
    .map_err(|e| ApiError::hinted("initiate-tables", e))?;
    Ok(Json(OutcomeResponse::ok()))
}
