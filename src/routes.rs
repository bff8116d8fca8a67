//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`             - Short link redirect
//! - `GET  /health`             - Health check: database and cache
//! - `POST /api/shorten`        - Create a short link (rate limited)
//! - `GET  /api/count/{code}`   - Visit count (rate limited)
//!
//! Requests are traced, and trailing slashes are trimmed before routing.

use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{rate_limit, tracing};
use crate::api::routes::api_routes;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Per-IP limits applied to `/api`.
#[derive(Debug, Clone, Copy)]
pub struct RateLimit {
    pub per_second: u64,
    pub burst_size: u32,
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState, rate_limit: Option<RateLimit>) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, rate_limit))
}

/// Routes and per-route middleware, without path normalization.
///
/// When `rate_limit` is `None` the API is not throttled (used by tests that
/// run without connect info).
pub fn router(state: AppState, rate_limit: Option<RateLimit>) -> Router {
    let mut api_router = api_routes();
    if let Some(limit) = rate_limit {
        api_router = api_router.layer(rate_limit::layer(limit.per_second, limit.burst_size));
    }

    Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer())
}
