//! Handler for link shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::application::services::LinkService;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a long URL, or returns the existing one.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// `201 Created` for a new link, `200 OK` when the URL was already shortened:
///
/// ```json
/// {
///   "code": "3f9a1",
///   "short_url": "https://s.example.com/3f9a1",
///   "long_url": "https://example.com/some/long/path"
/// }
/// ```
///
/// # Errors
///
/// - 400 `invalid_input` if the URL is missing or not http(s)
/// - 500 `conflict_exhausted` if no free code could be stored
/// - 500 `store_error` on database failure
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.check()?;

    let outcome = state.link_service.create_short_link(&payload.url).await?;

    let status = if outcome.reused {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };

    let short_url = LinkService::short_url(&state.base_url, &outcome.code);

    Ok((
        status,
        Json(ShortenResponse {
            code: outcome.code,
            short_url,
            long_url: payload.url,
        }),
    ))
}
