//! Per-IP rate limiting for API endpoints using a token bucket.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Limiter layer type returned by [`layer`].
pub type RateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a rate limiter keyed by the peer socket address.
///
/// Requests exceeding the limit receive `429 Too Many Requests`. The server
/// must be started with connect info for the key extractor to work.
///
/// # Panics
///
/// Panics if `per_second` or `burst_size` is zero; `Config::validate`
/// rejects both before the router is built.
///
/// # Example
///
/// ```rust,ignore
/// let api = Router::new()
///     .route("/shorten", post(shorten_handler))
///     .layer(rate_limit::layer(2, 100));
/// ```
pub fn layer(per_second: u64, burst_size: u32) -> RateLimitLayer {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(per_second)
            .burst_size(burst_size)
            .finish()
            .expect("rate limit values must be non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
