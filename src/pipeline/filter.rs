// src/pipeline/filter.rs

//! Keyword and location filtering.

use crate::models::JobListing;

/// Keep listings whose title contains any keyword and whose location contains
/// any location, both compared case-insensitively.
///
/// An empty keyword or location list matches nothing.
pub fn filter_listings(
    listings: Vec<JobListing>,
    keywords: &[String],
    locations: &[String],
) -> Vec<JobListing> {
    let keywords = lowercased(keywords);
    let locations = lowercased(locations);

    listings
        .into_iter()
        .filter(|listing| {
            contains_any(&listing.title, &keywords) && contains_any(&listing.location, &locations)
        })
        .collect()
}

fn lowercased(terms: &[String]) -> Vec<String> {
    terms.iter().map(|term| term.to_lowercase()).collect()
}

fn contains_any(text: &str, needles: &[String]) -> bool {
    let text = text.to_lowercase();
    needles.iter().any(|needle| text.contains(needle.as_str()))
}
