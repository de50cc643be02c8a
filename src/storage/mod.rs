// src/storage/mod.rs

//! Storage abstractions for the seen set.
//!
//! The seen set is every listing reported by earlier runs. It is read once
//! per run and written back with the new listings appended.

pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::JobListing;

// Re-export for convenience
pub use local::LocalStore;

/// Trait for seen-set storage backends.
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Load the seen set. An absent store is an empty set.
    async fn load(&self) -> Result<Vec<JobListing>>;

    /// Replace the stored set with `listings`.
    async fn save(&self, listings: &[JobListing]) -> Result<()>;

    /// Human-readable location of the store, for logs.
    fn location(&self) -> String;
}
