// src/pipeline/diff.rs

//! Diff calculation against the seen set.
//!
//! A listing is new if no structurally equal listing was stored by an earlier
//! run. Only additions matter; listings that disappeared from a source are
//! kept in the seen set.

use std::collections::HashSet;

use crate::models::JobListing;

/// Result of comparing one run's listings with the seen set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffResult {
    /// Listings not present in the seen set, in scrape order
    pub added: Vec<JobListing>,
    /// Number of current listings already in the seen set
    pub already_seen: usize,
}

impl DiffResult {
    /// Check if there are any new listings.
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty()
    }
}

/// Calculate the diff between the current listings and the seen set.
pub fn calculate_diff(current: &[JobListing], seen: &[JobListing]) -> DiffResult {
    let seen: HashSet<&JobListing> = seen.iter().collect();

    let mut result = DiffResult::default();
    for listing in current {
        if seen.contains(listing) {
            result.already_seen += 1;
        } else {
            result.added.push(listing.clone());
        }
    }
    result
}
