//! Health endpoint.
//!
//! `GET /health` queries the store once. A store that answers makes the
//! service `healthy` (200); a failing store makes it `degraded` (503) so
//! orchestrators stop routing traffic to it.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::Utc;
use tracing::{instrument, warn};

use crate::metrics;
use crate::models::HealthResponse;
use crate::state::AppState;

/// Health check endpoint.
///
/// # Response Body
///
/// ```json
/// {
///   "status": "healthy",
///   "store_backend": "memory",
///   "coffees_count": 4,
///   "version": "0.1.0",
///   "uptime_seconds": 12,
///   "timestamp": "2024-01-15T10:30:00Z"
/// }
/// ```
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let store = state.coffees.store();

    let (status, coffees_count) = match store.count().await {
        Ok(count) => {
            metrics::set_record_count(count);
            (StatusCode::OK, Some(count))
        }
        Err(e) => {
            warn!(error = %e, "Store did not answer health check");
            (StatusCode::SERVICE_UNAVAILABLE, None)
        }
    };

    let body = HealthResponse {
        status: if status == StatusCode::OK {
            "healthy"
        } else {
            "degraded"
        }
        .to_string(),
        store_backend: store.backend().to_string(),
        coffees_count,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        timestamp: Utc::now(),
    };

    (status, Json(body))
}
