//! # Body Validation Middleware
//!
//! The non-injecting stage of the validation pipeline. Routes with a
//! `{type_name}` path parameter get their JSON body checked against the
//! schema registered under that name before the handler runs. The body is
//! re-attached unchanged, so the handler may read it or ignore it.
//!
//! Mount with `route_layer` so the path parameter is available:
//!
//! ```ignore
//! Router::new()
//!     .route("/validate/{type_name}", post(accept))
//!     .route_layer(from_fn_with_state(state.clone(), require_valid_body))
//! ```

use axum::body::{to_bytes, Body};
use axum::extract::{Path, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use serde_json::Value;

use crate::error::AppError;
use crate::state::AppState;

/// Largest request body the middleware will buffer.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Reject the request unless its body conforms to the schema named by the
/// `type_name` path parameter.
pub async fn require_valid_body(
    State(state): State<AppState>,
    Path(type_name): Path<String>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let validator = state
        .schemas
        .get(&type_name)
        .ok_or_else(|| AppError::NotFound(format!("unknown type \"{type_name}\"")))?;

    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| AppError::BadRequest(format!("failed to read request body: {e}")))?;
    let payload: Value = serde_json::from_slice(&bytes)
        .map_err(|e| AppError::BadRequest(format!("request body is not valid JSON: {e}")))?;

    validator.check(&payload).map_err(|failure| {
        tracing::debug!(
            type_name = %type_name,
            path = %failure.path,
            message = %failure.message,
            "payload rejected"
        );
        AppError::PayloadInvalid(failure)
    })?;

    let request = Request::from_parts(parts, Body::from(bytes));
    Ok(next.run(request).await)
}
