//! # Custom Extractors & Validation
//!
//! [`ValidatedJson<T>`] is the injecting stage of the validation pipeline:
//! a handler that lists it among its arguments receives the payload only
//! after it has passed `T`'s schema. Handlers that validate a body but do
//! not take it use the
//! [`require_valid_body`](crate::middleware::validation::require_valid_body)
//! middleware instead.
//!
//! ```ignore
//! async fn create(ValidatedJson(model): ValidatedJson<Model>) -> Json<Model> {
//!     Json(model)
//! }
//! ```

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde_json::Value;

use crate::error::AppError;
use crate::model::RegisteredType;
use crate::state::AppState;

/// Extract a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Validate a JSON payload against the schema registered for `T`, then
/// convert it into `T`.
///
/// The validator is looked up by [`RegisteredType::TYPE_NAME`] in the
/// registry carried by [`AppState`]. `T`'s definition is only built when
/// the name is missing, and is then registered.
pub fn validate_payload<T: RegisteredType>(state: &AppState, payload: Value) -> Result<T, AppError> {
    let validator = match state.schemas.get(T::TYPE_NAME) {
        Some(validator) => validator,
        None => state
            .schemas
            .register_type::<T>()
            .map_err(|e| AppError::Internal(format!("schema for {}: {e}", T::TYPE_NAME)))?,
    };

    let payload = validator.validate(payload).into_result().map_err(|failure| {
        tracing::debug!(
            type_name = T::TYPE_NAME,
            path = %failure.path,
            message = %failure.message,
            "payload rejected"
        );
        AppError::PayloadInvalid(failure)
    })?;

    serde_json::from_value(payload).map_err(|e| AppError::BadRequest(e.to_string()))
}

/// JSON body validated against `T`'s schema before deserialization.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T> FromRequest<AppState> for ValidatedJson<T>
where
    T: RegisteredType + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let payload: Value = extract_json(Json::<Value>::from_request(req, state).await)?;
        validate_payload::<T>(state, payload).map(ValidatedJson)
    }
}
