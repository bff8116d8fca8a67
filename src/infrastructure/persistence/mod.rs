//! PostgreSQL repository implementations.
//!
//! - [`PgLinkRepository`] - Link storage, lookups and visit counting

pub mod pg_link_repository;

pub use pg_link_repository::PgLinkRepository;
