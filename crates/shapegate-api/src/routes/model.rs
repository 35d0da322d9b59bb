//! # Model Endpoints
//!
//! The model submission service: `POST /` accepts a [`Model`] payload,
//! validates it against the derived schema and echoes the typed record.

use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::model::Model;
use crate::state::AppState;

/// `{"ok": true}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OkResponse {
    pub ok: bool,
}

/// Build the model router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index).post(submit_model))
}

/// GET /: Service status.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is up", body = OkResponse),
    ),
    tag = "models"
)]
pub async fn index() -> Json<OkResponse> {
    Json(OkResponse { ok: true })
}

/// POST /: Validate a model and echo it back.
#[utoipa::path(
    post,
    path = "/",
    request_body = Model,
    responses(
        (status = 200, description = "Validated model", body = Model),
        (status = 400, description = "Payload violates the Model schema", body = crate::error::ValidationErrorBody),
    ),
    tag = "models"
)]
pub async fn submit_model(
    ValidatedJson(model): ValidatedJson<Model>,
) -> Result<Json<Model>, AppError> {
    tracing::info!(model_id = model.id, name = %model.name, "model accepted");
    Ok(Json(model))
}
