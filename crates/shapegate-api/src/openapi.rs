//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI 3.1 spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "shapegate",
        version = "0.1.0",
        description = "Schema-validated JSON endpoints: payloads are checked against schemas derived from declarative type definitions and rejected with a path-annotated error.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        // Models
        crate::routes::model::index,
        crate::routes::model::submit_model,
        // Schemas
        crate::routes::schemas::list_schemas,
        crate::routes::schemas::get_schema,
        crate::routes::schemas::validate_payload,
        // Operations
        crate::middleware::metrics::metrics_snapshot,
    ),
    components(schemas(
        crate::model::Model,
        crate::model::Material,
        crate::routes::model::OkResponse,
        crate::routes::schemas::SchemaListResponse,
        crate::routes::schemas::ValidateResponse,
        crate::middleware::metrics::MetricsSnapshot,
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::error::ValidationErrorBody,
    )),
    tags(
        (name = "models", description = "Model submission"),
        (name = "schemas", description = "Schema registry and generic validation"),
        (name = "operations", description = "Service counters"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_lists_every_route() {
        let spec = ApiDoc::openapi();
        let paths: Vec<&str> = spec.paths.paths.keys().map(String::as_str).collect();
        for expected in ["/", "/schemas", "/schemas/{type_name}", "/validate/{type_name}", "/metrics"] {
            assert!(paths.contains(&expected), "missing {expected} in {paths:?}");
        }
    }

    #[test]
    fn spec_serializes() {
        let json = serde_json::to_value(ApiDoc::openapi()).unwrap();
        assert_eq!(json["info"]["title"], "shapegate");
    }
}
