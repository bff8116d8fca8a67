//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::error::AppError;

/// Request to shorten a URL.
///
/// `long_url` is accepted as an alias of `url`.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten (must be valid HTTP/HTTPS).
    #[serde(default, alias = "long_url")]
    #[validate(length(min = 1, message = "URL is required"))]
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,
}

impl ShortenRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Runs the field rules and the scheme check.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] if the URL is missing, malformed or
    /// not http(s).
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()?;
        self.ensure_http_scheme()
    }

    /// Rejects URLs whose scheme is not `http` or `https`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] for any other scheme.
    pub fn ensure_http_scheme(&self) -> Result<(), AppError> {
        match url::Url::parse(&self.url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
            Ok(parsed) => Err(AppError::invalid_input(
                "Only http and https URLs can be shortened",
                json!({ "scheme": parsed.scheme() }),
            )),
            Err(e) => Err(AppError::invalid_input(
                "Invalid URL format",
                json!({ "reason": e.to_string() }),
            )),
        }
    }
}

/// Created (or reused) short link.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub code: String,
    pub short_url: String,
    pub long_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(url: &str) -> ShortenRequest {
        ShortenRequest::new(url)
    }

    #[test]
    fn test_valid_request() {
        let req = request("https://example.com/path?q=1");
        assert!(req.validate().is_ok());
        assert!(req.ensure_http_scheme().is_ok());
    }

    #[test]
    fn test_empty_url_fails_validation() {
        assert!(request("").validate().is_err());
    }

    #[test]
    fn test_malformed_url_fails_validation() {
        assert!(request("not a url").validate().is_err());
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let err = request("ftp://example.com/file").ensure_http_scheme().unwrap_err();
        assert!(matches!(err, AppError::InvalidInput { .. }));
    }

    #[test]
    fn test_check_rejects_what_the_api_refuses() {
        for url in ["", "not a url", "ftp://example.com/file", "mailto:a@example.com"] {
            let err = request(url).check().unwrap_err();
            assert!(
                matches!(err, AppError::InvalidInput { .. }),
                "{url:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_check_accepts_http_and_https() {
        assert!(request("http://example.com").check().is_ok());
        assert!(request("https://example.com/a?b=c").check().is_ok());
    }

    #[test]
    fn test_long_url_alias() {
        let req: ShortenRequest =
            serde_json::from_str(r#"{ "long_url": "https://example.com" }"#).unwrap();
        assert_eq!(req.url, "https://example.com");
    }

    #[test]
    fn test_missing_url_defaults_to_empty() {
        let req: ShortenRequest = serde_json::from_str("{}").unwrap();
        assert!(req.validate().is_err());
    }
}
