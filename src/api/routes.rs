//! API route configuration.

use crate::api::handlers::{shorten_handler, visit_count_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten`       - Create (or reuse) a short link
/// - `GET  /count/{code}`  - Visit count for a short link
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/count/{code}", get(visit_count_handler))
}
