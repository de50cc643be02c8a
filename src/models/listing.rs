// src/models/listing.rs

//! Job listing data structure.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A job posting observed on an employer's source.
///
/// Equality is structural over all four fields; there is no identifier, so two
/// postings with identical fields cannot be told apart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct JobListing {
    /// Employer name, taken from the target's key in the config
    #[serde(alias = "firm")]
    pub employer: String,

    /// Posting title
    pub title: String,

    /// Posting location as shown by the source
    pub location: String,

    /// Link to the posting (may be empty)
    #[serde(default)]
    pub link: String,
}

impl JobListing {
    pub fn new(
        employer: impl Into<String>,
        title: impl Into<String>,
        location: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            employer: employer.into(),
            title: title.into(),
            location: location.into(),
            link: link.into(),
        }
    }
}

/// `employer - title - location`, without the link.
impl fmt::Display for JobListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - {}", self.employer, self.title, self.location)
    }
}
