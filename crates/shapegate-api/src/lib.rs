//! # shapegate-api: Schema-Validated HTTP Service
//!
//! Serves JSON endpoints whose request bodies are validated against
//! schemas derived from [`Describe`](shapegate_core::Describe) definitions.
//! A nonconforming payload never reaches its handler; the client gets a
//! 400 naming the violation and where it is.
//!
//! ## API Surface
//!
//! | Route                        | Module                 |
//! |------------------------------|------------------------|
//! | `GET /`, `POST /`            | [`routes::model`]      |
//! | `GET /schemas`, `GET /schemas/{type}` | [`routes::schemas`] |
//! | `POST /validate/{type}`      | [`routes::schemas`]    |
//! | `GET /metrics`               | [`middleware::metrics`] |
//! | `GET /openapi.json`          | [`openapi`]            |
//! | `GET /health/*`              | this module            |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → [require_valid_body] → Handler
//! ```

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod model;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;

use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;

use crate::middleware::metrics::ApiMetrics;
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let metrics = ApiMetrics::new();

    let api = Router::new()
        .merge(routes::model::router())
        .merge(routes::schemas::router(state.clone()))
        .merge(openapi::router())
        .route("/metrics", get(middleware::metrics::metrics_snapshot))
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    Router::new()
        .merge(health)
        .merge(api)
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(middleware::tracing_layer::layer())
        .layer(axum::Extension(metrics))
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: returns 200 when the application is ready to serve.
async fn readiness() -> &'static str {
    "ready"
}
