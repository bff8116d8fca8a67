//! Handler for the visit count endpoint.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::visits::VisitCountResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns how many times a short link has been followed.
///
/// # Endpoint
///
/// `GET /api/count/{code}`
///
/// # Errors
///
/// Returns 400 Bad Request for malformed codes.
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn visit_count_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<VisitCountResponse>, AppError> {
    let visit_count = state.link_service.get_visit_count(&code).await?;

    Ok(Json(VisitCountResponse { code, visit_count }))
}
