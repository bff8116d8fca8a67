//! DTOs for the visit count endpoint.

use serde::Serialize;

/// Number of recorded redirects for a short code.
#[derive(Debug, Serialize)]
pub struct VisitCountResponse {
    pub code: String,
    pub visit_count: i64,
}
