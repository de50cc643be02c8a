// src/models/target.rs

//! Employer target definitions: HTML career pages and JSON job APIs.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A career page scraped with tag/attribute selectors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HtmlTarget {
    /// Career page URL
    pub url: String,

    /// Tag name of each listing container (e.g. "div", "li")
    pub job_selector_tag: String,

    /// Attributes every container must carry; `class` matches any one class
    #[serde(default)]
    pub job_selector_attr: IndexMap<String, String>,

    /// Tag name of the title element within a container
    pub title_selector_tag: String,

    /// Class the title element must carry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_selector_class: Option<String>,

    /// Tag name of the location element within a container
    pub location_selector_tag: String,

    /// Class the location element must carry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_selector_class: Option<String>,
}

impl HtmlTarget {
    /// Human-readable form of the title selector, for error messages.
    pub fn title_description(&self) -> String {
        describe(&self.title_selector_tag, self.title_selector_class.as_deref())
    }

    /// Human-readable form of the location selector, for error messages.
    pub fn location_description(&self) -> String {
        describe(
            &self.location_selector_tag,
            self.location_selector_class.as_deref(),
        )
    }
}

fn describe(tag: &str, class: Option<&str>) -> String {
    match class {
        Some(class) => format!("{tag}.{class}"),
        None => tag.to_string(),
    }
}

/// A JSON API returning job postings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiTarget {
    /// Endpoint URL
    pub url: String,

    /// Request headers sent with the GET
    #[serde(default)]
    pub headers: IndexMap<String, String>,

    /// Key holding the listing array when the response is an object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Field name holding the posting title
    pub title: String,

    /// Field name holding the posting location
    pub location: String,

    /// Field name holding the posting link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl ApiTarget {
    /// Configured link field, treating an empty name as not configured.
    pub fn link_field(&self) -> Option<&str> {
        self.link.as_deref().filter(|field| !field.is_empty())
    }
}
