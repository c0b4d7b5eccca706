//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::domain::validation;
use crate::errors::AppError;

/// JSON body that has passed its declared field constraints.
///
/// A body that fails to decode is rejected with the decoder's message;
/// a decoded body with bad fields is rejected with every violation listed.
///
/// ```rust,ignore
/// async fn create(ValidatedJson(payload): ValidatedJson<CreateEmployeeRequest>) {
///     // every field constraint already holds
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        validation::check(&value).map_err(|violations| {
            tracing::debug!(count = violations.len(), "Request rejected by field validation");
            AppError::InvalidFields(violations)
        })?;

        Ok(ValidatedJson(value))
    }
}
