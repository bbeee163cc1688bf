//! Carrier and vehicle HTTP Routes

use std::sync::Arc;

use axum::{
    extract::{Json, Query, State},
    routing::get,
    Router,
};
use serde::Deserialize;

use super::errors::{ApiError, ApiResult};
use super::request::required;
use super::state::{DataResponse, GatewayState};
use crate::queries;

/// Carrier routes
pub fn carrier_routes(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route("/aggregate-carrier", get(best_carrier_handler))
        .route("/models", get(models_handler))
        .route("/divModels", get(division_handler))
        .with_state(state)
}

async fn best_carrier_handler(
    State(state): State<Arc<GatewayState>>,
) -> ApiResult<Json<DataResponse>> {
    let rows = queries::best_carrier_per_area(state.store.as_ref())
        .await
        .map_err(|e| ApiError::from_exec("aggregate-carrier", e))?;
    Ok(Json(DataResponse::rows(rows)))
}

async fn models_handler(State(state): State<Arc<GatewayState>>) -> ApiResult<Json<DataResponse>> {
    let rows = queries::vehicle_models(state.store.as_ref())
        .await
        .map_err(|e| ApiError::from_exec("models", e))?;
    Ok(Json(DataResponse::rows(rows)))
}

#[derive(Debug, Deserialize)]
pub struct DivisionQuery {
    pub models: Option<String>,
}

async fn division_handler(
    State(state): State<Arc<GatewayState>>,
    Query(query): Query<DivisionQuery>,
) -> ApiResult<Json<DataResponse>> {
    let models = required("models", &query.models)?;
    let rows = queries::carriers_with_all_models(state.store.as_ref(), models)
        .await
        .map_err(|e| ApiError::from_exec("divModels", e))?;
    Ok(Json(DataResponse::rows(rows)))
}
