//! Application routing configuration with middleware stack.
//!
//! # Middleware Stack (outermost first)
//!
//! ```text
//! Request
//!    │
//!    ▼
//! ┌──────────────────┐
//! │   Request ID     │ ← Adds X-Request-Id header
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │     Tracing      │ ← HTTP request/response logging
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │      CORS        │ ← Cross-origin headers
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │   Body Limit     │ ← 413 if exceeded
//! └────────┬─────────┘
//!          ▼
//!      Handler
//! ```
//!
//! # Route Groups
//!
//! - `/coffees` - Coffee CRUD
//! - `/greeting`, `/greeting/coffee`, `/droid` - Configuration-bound values
//! - `/health` - Health check

use axum::Router;
use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::Request;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{Span, info, info_span};

use crate::handlers;
use crate::middleware::{RequestId, RequestIdLayer};
use crate::state::AppState;

/// Build the application router with all routes and middleware configured.
pub fn build_router(state: AppState) -> Router {
    let config = &state.config;

    let cors = build_cors_layer(&config.cors_allowed_origins);

    let mut router = Router::new()
        .route("/health", get(handlers::health_check))
        // Coffee CRUD
        .route(
            "/coffees",
            get(handlers::list_coffees).post(handlers::create_coffee),
        )
        .route(
            "/coffees/{id}",
            get(handlers::get_coffee)
                .put(handlers::upsert_coffee)
                .delete(handlers::delete_coffee),
        )
        // Configuration-bound resources
        .route("/greeting", get(handlers::get_greeting))
        .route("/greeting/coffee", get(handlers::get_greeting_coffee))
        .route("/droid", get(handlers::get_droid));

    // =========================================================================
    // Apply Middleware Stack (order matters - applied bottom to top)
    // =========================================================================
    info!(
        max_size_bytes = config.max_request_body_size,
        "Request body size limit configured"
    );
    router = router
        .layer(DefaultBodyLimit::max(config.max_request_body_size))
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(RequestIdLayer::new());

    router.with_state(state)
}

/// Span for one HTTP request, tagged with the id set by [`RequestIdLayer`].
fn request_span(req: &Request<Body>) -> Span {
    let request_id = req
        .extensions()
        .get::<RequestId>()
        .map_or("unknown", |id| id.0.as_str());

    info_span!(
        "http_request",
        method = %req.method(),
        uri = %req.uri(),
        request_id
    )
}

/// Build CORS layer from configuration.
///
/// `*` anywhere in the list allows any origin; otherwise only the parseable
/// origins are allowed.
fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if allowed_origins.iter().any(|o| o == "*") {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<_> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer.allow_origin(origins)
    }
}
