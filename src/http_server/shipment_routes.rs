//! Shipment HTTP Routes

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;

use super::errors::{ApiError, ApiResult};
use super::request::{JsonBody, required};
use super::state::{DataResponse, GatewayState, OutcomeResponse};
use crate::queries;
use crate::query::de::opt_string_or_number;

/// Shipment routes
pub fn shipment_routes(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route("/delete-shipment", delete(delete_handler))
        .route("/shipments", get(projection_handler))
        .route(
            "/shipments-above-avg-package-size",
            get(above_average_handler),
        )
        .with_state(state)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteShipmentRequest {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub tracking_number: Option<String>,
}

async fn delete_handler(
    State(state): State<Arc<GatewayState>>,
    JsonBody(request): JsonBody<DeleteShipmentRequest>,
) -> ApiResult<Json<OutcomeResponse>> {
    let tracking_number = required("trackingNumber", &request.tracking_number)?;
    let deleted = queries::delete_shipment(state.store.as_ref(), tracking_number)
        .await
        .map_err(|e| ApiError::from_exec("delete-shipment", e))?;

    if deleted {
        Ok(Json(OutcomeResponse::ok()))
    } else {
        Err(ApiError::Opaque)
    }
}

#[derive(Debug, Deserialize)]
pub struct ProjectionQuery {
    pub fields: Option<String>,
}

async fn projection_handler(
    State(state): State<Arc<GatewayState>>,
    Query(query): Query<ProjectionQuery>,
) -> ApiResult<Json<DataResponse>> {
    let fields = required("fields", &query.fields)?;
    let rows = queries::project_shipments(state.store.as_ref(), fields)
        .await
        .map_err(|e| ApiError::from_exec("shipments", e))?;
    Ok(Json(DataResponse::rows(rows)))
}

async fn above_average_handler(
    State(state): State<Arc<GatewayState>>,
) -> ApiResult<Json<DataResponse>> {
    let rows = queries::shipments_above_average_package(state.store.as_ref())
        .await
        .map_err(|e| ApiError::from_exec("shipments-above-avg-package-size", e))?;
    Ok(Json(DataResponse::rows(rows)))
}
