//! Axum extractor for validated request bodies
//!
//! This module provides the `ValidatedJson<T>` extractor that deserializes a
//! JSON body into a typed input and runs its `validator` rules before the
//! handler sees it. Handlers therefore never assign entity fields straight
//! from the raw request mapping.

use crate::core::error::{ApiError, RequestError, ValidationError};
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Axum extractor that deserializes and validates a JSON body
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_park_area(
///     ValidatedJson(input): ValidatedJson<ParkAreaInput>,
/// ) -> ApiResult<Json<ParkAreaView>> {
///     // input is already shaped and checked
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    /// Get the inner input
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| RequestError::InvalidBody {
                message: e.to_string(),
            })?;

        let input = parse_and_validate::<T>(&body)?;
        Ok(ValidatedJson(input))
    }
}

/// Deserialize a JSON body into `T` and run its validation rules
pub fn parse_and_validate<T>(body: &[u8]) -> Result<T, ValidationError>
where
    T: DeserializeOwned + Validate,
{
    if body.is_empty() {
        return Err(ValidationError::InvalidJson {
            message: "request body is empty".to_string(),
        });
    }

    let input: T = serde_json::from_slice(body).map_err(|e| ValidationError::InvalidJson {
        message: e.to_string(),
    })?;

    input.validate()?;
    Ok(input)
}
