//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use tracing::warn;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL and counts the visit.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Validate the code format (no store access for malformed codes)
/// 2. Resolve the code (cache first, then database)
/// 3. Increment the visit counter
/// 4. Return 307 Temporary Redirect
///
/// A failed increment does not fail the redirect; it is logged instead.
///
/// # Errors
///
/// Returns 400 Bad Request for malformed codes.
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let long_url = state.link_service.resolve_short_link(&code).await?;

    match state.link_service.record_visit(&code).await {
        Ok(true) => {}
        Ok(false) => warn!(code = %code, "Resolved link missing when counting visit"),
        Err(e) => warn!(code = %code, error = %e, "Redirect served but visit not recorded"),
    }

    Ok(Redirect::temporary(&long_url))
}
