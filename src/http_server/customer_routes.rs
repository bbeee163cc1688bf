//! Customer HTTP Routes

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use super::errors::{ApiError, ApiResult};
use super::request::{JsonBody, required};
use super::state::{DataResponse, GatewayState, OutcomeResponse};
use crate::queries::{self, CustomerUpdate};
use crate::query::de::opt_string_or_number;
use crate::query::ValidationError;

/// Customer routes
pub fn customer_routes(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route("/update-customer", post(update_handler))
        .route("/aggregate-customer", get(aggregate_handler))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub home_address: Option<String>,
}

impl UpdateCustomerRequest {
    fn into_update(self) -> Result<CustomerUpdate, ValidationError> {
        Ok(CustomerUpdate {
            customer_id: required("customerId", &self.customer_id)?.to_string(),
            name: required("name", &self.name)?.to_string(),
            contact_number: required("contactNumber", &self.contact_number)?.to_string(),
            home_address: required("homeAddress", &self.home_address)?.to_string(),
        })
    }
}

async fn update_handler(
    State(state): State<Arc<GatewayState>>,
    JsonBody(request): JsonBody<UpdateCustomerRequest>,
) -> ApiResult<Json<OutcomeResponse>> {
    let update = request.into_update()?;
    let updated = queries::update_customer(state.store.as_ref(), &update)
        .await
        .map_err(|e| ApiError::from_exec("update-customer", e))?;

    if updated {
        Ok(Json(OutcomeResponse::ok()))
    } else {
        Err(ApiError::Opaque)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateCustomerQuery {
    pub min_order_amount: Option<String>,
}

async fn aggregate_handler(
    State(state): State<Arc<GatewayState>>,
    Query(query): Query<AggregateCustomerQuery>,
) -> ApiResult<Json<DataResponse>> {
    let min_orders = required("minOrderAmount", &query.min_order_amount)?;
    let rows = queries::customer_spending(state.store.as_ref(), min_orders)
        .await
        .map_err(|e| match e {
            queries::ExecError::Store(e) => {
                ApiError::generic("aggregate-customer", "Error aggregating customer", e)
            }
            other => ApiError::from_exec("aggregate-customer", other),
        })?;
    Ok(Json(DataResponse::rows(rows)))
}
