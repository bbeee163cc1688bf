//! Order HTTP Routes
//!
//! Dynamic selection plus the fixed order statements.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;

use super::errors::{ApiError, ApiResult};
use super::request::{JsonBody, required};
use super::state::{DataResponse, GatewayState, OutcomeResponse};
use crate::queries::{self, NewOrder};
use crate::query::de::opt_string_or_number;
use crate::query::{FilterCondition, ValidationError};

/// Order routes
pub fn order_routes(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route("/selection-orders", post(selection_handler))
        .route("/insert-order", post(insert_handler))
        .route("/join-query", get(join_handler))
        .with_state(state)
}

/// Pull the condition list out of a selection body.
///
/// A missing, non-array or empty list is `NoConditions`; malformed entries
/// are a shape error.
pub fn conditions_from_body(body: Value) -> Result<Vec<FilterCondition>, ValidationError> {
    let items = match body {
        Value::Object(mut map) => match map.remove("conditions") {
            Some(Value::Array(items)) if !items.is_empty() => items,
            _ => return Err(ValidationError::NoConditions),
        },
        _ => return Err(ValidationError::NoConditions),
    };

    items
        .into_iter()
        .map(|item| {
            serde_json::from_value(item)
                .map_err(|e| ValidationError::MissingField(format!("condition ({})", e)))
        })
        .collect()
}

async fn selection_handler(
    State(state): State<Arc<GatewayState>>,
    JsonBody(body): JsonBody<Value>,
) -> ApiResult<Json<DataResponse>> {
    let conditions = conditions_from_body(body)?;
    let rows = queries::select_orders(state.store.as_ref(), &conditions)
        .await
        .map_err(|e| ApiError::from_exec("selection-orders", e))?;
    Ok(Json(DataResponse::rows(rows)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOrderRequest {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub num: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub total_cost: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub customer_id: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub supplier_id: Option<String>,
}

impl InsertOrderRequest {
    fn into_order(self) -> Result<NewOrder, ValidationError> {
        Ok(NewOrder {
            num: required("num", &self.num)?.to_string(),
            date: required("date", &self.date)?.to_string(),
            total_cost: required("totalCost", &self.total_cost)?.to_string(),
            customer_id: required("customerId", &self.customer_id)?.to_string(),
            supplier_id: self.supplier_id.filter(|id| !id.is_empty()),
        })
    }
}

async fn insert_handler(
    State(state): State<Arc<GatewayState>>,
    JsonBody(request): JsonBody<InsertOrderRequest>,
) -> ApiResult<Json<OutcomeResponse>> {
    let order = request.into_order()?;
    let inserted = queries::insert_order(state.store.as_ref(), &order)
        .await
        .map_err(|e| ApiError::from_exec("insert-order", e))?;

    if inserted {
        Ok(Json(OutcomeResponse::ok()))
    } else {
        Err(ApiError::Opaque)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinQuery {
    pub order_number: Option<String>,
}

async fn join_handler(
    State(state): State<Arc<GatewayState>>,
    Query(query): Query<JoinQuery>,
) -> ApiResult<Json<DataResponse>> {
    let order_number = required("orderNumber", &query.order_number)?;
    let rows = queries::customer_for_order(state.store.as_ref(), order_number)
        .await
        .map_err(|e| ApiError::from_exec("join-query", e))?;
    Ok(Json(DataResponse::rows(rows)))
}
