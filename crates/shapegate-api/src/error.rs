//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//!
//! A payload that fails schema validation is answered with the flat body
//! clients of this service rely on:
//!
//! ```json
//! {"error": "\"material\" is a required property", "path": "materials[0].material"}
//! ```
//!
//! Every other error uses the nested [`ErrorBody`] envelope with a
//! machine-readable code. Internal error details are never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use shapegate_schema::ValidationFailure;
use thiserror::Error;
use utoipa::ToSchema;

use crate::middleware::metrics::PayloadRejected;

/// Body of a 400 response for a payload that violates its schema.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorBody {
    /// Violation message.
    pub error: String,
    /// Location of the violation, e.g. `materials[0].material`. Empty for
    /// the payload root.
    pub path: String,
}

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "BAD_REQUEST").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Payload violates the schema of its type (400, flat body).
    #[error("payload invalid: {0}")]
    PayloadInvalid(ValidationFailure),

    /// Request body could not be read, parsed, or converted (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Unknown type or route resource (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::PayloadInvalid(_) => (StatusCode::BAD_REQUEST, "PAYLOAD_INVALID"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl From<ValidationFailure> for AppError {
    fn from(failure: ValidationFailure) -> Self {
        Self::PayloadInvalid(failure)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if let Self::PayloadInvalid(failure) = self {
            let body = ValidationErrorBody {
                error: failure.message,
                path: failure.path.to_string(),
            };
            let mut response = (status, Json(body)).into_response();
            response.extensions_mut().insert(PayloadRejected);
            return response;
        }

        // Never expose internal error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        if matches!(&self, Self::Internal(_)) {
            tracing::error!(error = %self, "internal server error");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}
