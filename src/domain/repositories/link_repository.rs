//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Durable storage of link records with atomic counter increments.
///
/// Every read must observe all previously committed writes, including those
/// made by concurrent callers.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Returns the code already assigned to `long_url`, if any.
    ///
    /// When several records share the same long URL, the oldest one wins.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn find_code_for(&self, long_url: &str) -> Result<Option<String>, AppError>;

    /// Returns the long URL behind `code`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn find_url_for(&self, code: &str) -> Result<Option<String>, AppError>;

    /// Checks whether `code` is already taken.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn exists(&self, code: &str) -> Result<bool, AppError>;

    /// Inserts a new link with a zero visit count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code is already present. The
    /// check is atomic with the insert, so concurrent writers of the same
    /// code see exactly one success.
    ///
    /// Returns [`AppError::Store`] on any other database error.
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Atomically adds one to the visit counter of `code`.
    ///
    /// Returns `Ok(false)` without side effects when the code is absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn increment_visits(&self, code: &str) -> Result<bool, AppError>;

    /// Returns the visit counter of `code`, if the code exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn visit_count(&self, code: &str) -> Result<Option<i64>, AppError>;

    /// Counts all stored links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
