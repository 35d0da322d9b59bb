//! # Request Metrics
//!
//! In-process request counters kept in atomics and exposed as JSON at
//! `GET /metrics`. Payloads rejected by schema validation are counted
//! separately from other client errors.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use axum::{Extension, Json};
use serde::Serialize;
use utoipa::ToSchema;

/// Response extension set on every response produced for a payload that
/// failed schema validation.
#[derive(Debug, Clone, Copy)]
pub struct PayloadRejected;

/// Shared metrics state.
#[derive(Debug, Clone)]
pub struct ApiMetrics {
    pub request_count: Arc<AtomicU64>,
    pub error_count: Arc<AtomicU64>,
    pub rejected_payload_count: Arc<AtomicU64>,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct MetricsSnapshot {
    /// Requests served.
    pub requests: u64,
    /// Responses with a 4xx or 5xx status.
    pub errors: u64,
    /// Payloads rejected by schema validation.
    pub rejected_payloads: u64,
}

impl ApiMetrics {
    /// Create a new metrics instance.
    pub fn new() -> Self {
        Self {
            request_count: Arc::new(AtomicU64::new(0)),
            error_count: Arc::new(AtomicU64::new(0)),
            rejected_payload_count: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Return current request count.
    pub fn requests(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Return current error count.
    pub fn errors(&self) -> u64 {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Return the number of payloads rejected by schema validation.
    pub fn rejected_payloads(&self) -> u64 {
        self.rejected_payload_count.load(Ordering::Relaxed)
    }

    /// Copy the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests: self.requests(),
            errors: self.errors(),
            rejected_payloads: self.rejected_payloads(),
        }
    }
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Middleware that increments request, error and rejection counters.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let metrics = request.extensions().get::<ApiMetrics>().cloned();

    let response = next.run(request).await;

    if let Some(m) = metrics {
        m.request_count.fetch_add(1, Ordering::Relaxed);
        if response.status().is_server_error() || response.status().is_client_error() {
            m.error_count.fetch_add(1, Ordering::Relaxed);
        }
        if response.extensions().get::<PayloadRejected>().is_some() {
            m.rejected_payload_count.fetch_add(1, Ordering::Relaxed);
        }
    }

    response
}

/// GET /metrics: Current request counters.
#[utoipa::path(
    get,
    path = "/metrics",
    responses(
        (status = 200, description = "Request counters", body = MetricsSnapshot),
    ),
    tag = "operations"
)]
pub async fn metrics_snapshot(Extension(metrics): Extension<ApiMetrics>) -> Json<MetricsSnapshot> {
    Json(metrics.snapshot())
}
