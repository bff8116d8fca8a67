//! Core domain entities.
//!
//! - [`Link`] - A stored short code ↔ long URL mapping with its visit counter
//! - [`NewLink`] - Input for inserting a new mapping

pub mod link;

pub use link::{Link, NewLink};
