//! Request body helpers.

use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use super::errors::ApiError;
use crate::query::ValidationError;

/// JSON body whose rejections render as `ApiError::BadRequest`
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| ApiError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Non-empty value, or `None`
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Non-empty value, or `MissingField` naming `field`
pub fn required<'a>(field: &str, value: &'a Option<String>) -> Result<&'a str, ValidationError> {
    present(value).ok_or_else(|| ValidationError::MissingField(field.to_string()))
}
