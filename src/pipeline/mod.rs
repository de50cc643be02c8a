// src/pipeline/mod.rs

//! Pipeline stages and the run that composes them.
//!
//! - `normalize_api`: API payload to listings
//! - `filter_listings`: keyword/location criteria
//! - `calculate_diff`: listings not in the seen set
//! - `run_pipeline`: one full pass over all targets

pub mod diff;
pub mod filter;
pub mod normalize;
pub mod run;

pub use diff::{DiffResult, calculate_diff};
pub use filter::filter_listings;
pub use normalize::normalize_api;
pub use run::{RunSummary, run_pipeline};
