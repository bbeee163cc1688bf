//! Login HTTP Routes
//!
//! Role-dispatched credential check. No session or token is issued.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::errors::{ApiError, ApiResult};
use super::request::{JsonBody, present};
use super::state::GatewayState;
use crate::auth::{AuthError, LoginOutcome, UserRecord};
use crate::query::de::opt_string_or_number;

/// Login routes
pub fn login_routes(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route("/login", post(login_handler))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub password: Option<String>,
    #[serde(default)]
    pub user_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: UserRecord,
}

async fn login_handler(
    State(state): State<Arc<GatewayState>>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let (Some(user_id), Some(password), Some(user_type)) = (
        present(&request.user_id),
        present(&request.password),
        present(&request.user_type),
    ) else {
        return Err(AuthError::MissingInput.into());
    };

    match state.resolver.resolve(user_id, password, user_type).await? {
        LoginOutcome::Authenticated(user) => Ok(Json(LoginResponse {
            success: true,
            user,
        })),
        LoginOutcome::Rejected => Err(ApiError::Unauthorized),
    }
}
