//! # Schema Endpoints
//!
//! Read access to the schema registry, and a generic validation endpoint
//! for any registered type. The validation endpoint's handler never sees
//! the payload: the [`require_valid_body`] middleware checks it first.

use axum::extract::{Path, State};
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::middleware::validation::require_valid_body;
use crate::state::AppState;

/// Registered type names.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SchemaListResponse {
    /// Sorted type names.
    pub types: Vec<String>,
}

/// Acknowledgement for a conforming payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidateResponse {
    pub ok: bool,
    /// Type the payload was checked against.
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Build the schema router. The validation route is wrapped in the body
/// validation middleware, which needs the state up front.
pub fn router(state: AppState) -> Router<AppState> {
    let validate = Router::new()
        .route("/validate/{type_name}", post(validate_payload))
        .route_layer(from_fn_with_state(state, require_valid_body));

    Router::new()
        .route("/schemas", get(list_schemas))
        .route("/schemas/{type_name}", get(get_schema))
        .merge(validate)
}

/// GET /schemas: List registered types.
#[utoipa::path(
    get,
    path = "/schemas",
    responses(
        (status = 200, description = "Registered type names", body = SchemaListResponse),
    ),
    tag = "schemas"
)]
pub async fn list_schemas(State(state): State<AppState>) -> Json<SchemaListResponse> {
    Json(SchemaListResponse {
        types: state.schemas.names(),
    })
}

/// GET /schemas/{type_name}: Derived schema document for one type.
#[utoipa::path(
    get,
    path = "/schemas/{type_name}",
    params(("type_name" = String, Path, description = "Registered type name")),
    responses(
        (status = 200, description = "Schema document", body = Object),
        (status = 404, description = "Unknown type", body = crate::error::ErrorBody),
    ),
    tag = "schemas"
)]
pub async fn get_schema(
    State(state): State<AppState>,
    Path(type_name): Path<String>,
) -> Result<Json<Value>, AppError> {
    let validator = state
        .schemas
        .get(&type_name)
        .ok_or_else(|| AppError::NotFound(format!("unknown type \"{type_name}\"")))?;
    Ok(Json(validator.schema().to_value()))
}

/// POST /validate/{type_name}: Check a payload against a registered type.
#[utoipa::path(
    post,
    path = "/validate/{type_name}",
    params(("type_name" = String, Path, description = "Registered type name")),
    request_body = Object,
    responses(
        (status = 200, description = "Payload conforms", body = ValidateResponse),
        (status = 400, description = "Payload violates the schema", body = crate::error::ValidationErrorBody),
        (status = 404, description = "Unknown type", body = crate::error::ErrorBody),
    ),
    tag = "schemas"
)]
pub async fn validate_payload(Path(type_name): Path<String>) -> Json<ValidateResponse> {
    Json(ValidateResponse {
        ok: true,
        type_name,
    })
}
