//! Link creation, resolution and visit counting.

use std::sync::Arc;

use crate::domain::entities::NewLink;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::code_generator::{candidate_code, random_salt, validate_code};
use serde_json::json;
use tracing::{debug, info, warn};

/// Default number of candidates tried before code generation gives up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

/// Default number of times creation restarts after losing an insert race.
pub const DEFAULT_MAX_INSERT_RETRIES: usize = 3;

/// Retry budgets for short code creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationLimits {
    /// Candidates checked against the store per generation run.
    pub max_attempts: usize,
    /// Full creation attempts when the store reports a code conflict on insert.
    pub max_insert_retries: usize,
}

impl Default for GenerationLimits {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_insert_retries: DEFAULT_MAX_INSERT_RETRIES,
        }
    }
}

/// Result of a creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenOutcome {
    pub code: String,
    /// True when the URL had already been shortened and its code was returned.
    pub reused: bool,
}

/// Service for creating, resolving and counting short links.
///
/// Creation is idempotent per long URL. New codes come from a hash of the
/// URL, re-salted on collision, and the store's uniqueness constraint is the
/// final arbiter between concurrent creators.
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
    cache: Arc<dyn CacheService>,
    limits: GenerationLimits,
}

impl LinkService {
    /// Creates a new link service with default retry budgets.
    pub fn new(repository: Arc<dyn LinkRepository>, cache: Arc<dyn CacheService>) -> Self {
        Self {
            repository,
            cache,
            limits: GenerationLimits::default(),
        }
    }

    /// Overrides the retry budgets.
    pub fn with_limits(mut self, limits: GenerationLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Returns the short code for `long_url`, creating it if needed.
    ///
    /// # Flow
    ///
    /// 1. If the URL was shortened before, return its code unchanged
    /// 2. Otherwise generate a free code (see [`Self::generate_unique_code`])
    /// 3. Insert; on a uniqueness conflict start over from step 1, since a
    ///    concurrent request may have stored the same URL
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] if the URL is blank.
    ///
    /// Returns [`AppError::ConflictExhausted`] if no free code was found, or
    /// every insert attempt lost a race.
    ///
    /// Returns [`AppError::Store`] on database errors.
    pub async fn create_short_link(&self, long_url: &str) -> Result<ShortenOutcome, AppError> {
        if long_url.trim().is_empty() {
            return Err(AppError::invalid_input(
                "Long URL is required",
                json!({ "field": "url" }),
            ));
        }

        for attempt in 1..=self.limits.max_insert_retries {
            if let Some(code) = self.repository.find_code_for(long_url).await? {
                debug!(code = %code, "Reusing existing short code");
                return Ok(ShortenOutcome { code, reused: true });
            }

            let code = self.generate_unique_code(long_url).await?;

            match self.repository.insert(NewLink::new(code, long_url)).await {
                Ok(link) => {
                    info!(code = %link.code, id = link.id, "Short link created");
                    return Ok(ShortenOutcome {
                        code: link.code,
                        reused: false,
                    });
                }
                Err(AppError::Conflict { .. }) => {
                    warn!(attempt, "Short code taken by a concurrent insert, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::conflict_exhausted(
            "Failed to store a unique short code",
            json!({ "insert_attempts": self.limits.max_insert_retries }),
        ))
    }

    /// Finds a code for `long_url` that is not yet in the store.
    ///
    /// The first candidate uses an empty salt, so it is the same for a given
    /// URL across runs. Each collision draws a new random salt. The returned
    /// code is only free at the moment of the check; the insert may still
    /// conflict with a concurrent writer.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ConflictExhausted`] after `max_attempts` collisions.
    ///
    /// Returns [`AppError::Store`] on database errors.
    pub async fn generate_unique_code(&self, long_url: &str) -> Result<String, AppError> {
        let mut salt = String::new();

        for attempt in 1..=self.limits.max_attempts {
            let candidate = candidate_code(long_url, &salt);

            if !self.repository.exists(&candidate).await? {
                return Ok(candidate);
            }

            debug!(attempt, code = %candidate, "Short code collision");
            salt = random_salt();
        }

        warn!(
            attempts = self.limits.max_attempts,
            "Gave up generating a unique short code"
        );

        Err(AppError::conflict_exhausted(
            "Failed to generate a unique short code",
            json!({ "attempts": self.limits.max_attempts }),
        ))
    }

    /// Resolves a short code to its long URL.
    ///
    /// Does not count a visit; callers serving a redirect follow up with
    /// [`Self::record_visit`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidCode`] for malformed codes, before any
    /// cache or store access.
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn resolve_short_link(&self, code: &str) -> Result<String, AppError> {
        validate_code(code)?;

        match self.cache.get_url(code).await {
            Ok(Some(long_url)) => return Ok(long_url),
            Ok(None) => {}
            Err(e) => warn!(code, error = %e, "Cache lookup failed"),
        }

        let long_url = self
            .repository
            .find_url_for(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

        if let Err(e) = self.cache.set_url(code, &long_url, None).await {
            warn!(code, error = %e, "Failed to cache URL");
        }

        Ok(long_url)
    }

    /// Adds one visit to `code`.
    ///
    /// Returns `Ok(false)` if the code does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidCode`] for malformed codes.
    pub async fn record_visit(&self, code: &str) -> Result<bool, AppError> {
        validate_code(code)?;
        self.repository.increment_visits(code).await
    }

    /// Returns the number of recorded visits for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidCode`] for malformed codes.
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn get_visit_count(&self, code: &str) -> Result<i64, AppError> {
        validate_code(code)?;

        self.repository
            .visit_count(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    /// Counts all stored links.
    pub async fn total_links(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    /// Constructs the public short URL for a code.
    pub fn short_url(base_url: &str, code: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), code)
    }
}
