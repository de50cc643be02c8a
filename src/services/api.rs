// src/services/api.rs

//! Job API collector.

use reqwest::Client;
use serde_json::{Map, Value};

use crate::error::{AppError, Result};
use crate::models::ApiTarget;
use crate::utils::http::{fetch_text, header_map};

/// Decoded body of a job API response.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiPayload {
    /// The body is the listing array itself
    Listings(Vec<Value>),
    /// The body is an object holding the array under some key
    Wrapped(Map<String, Value>),
}

impl ApiPayload {
    /// Classify a decoded JSON body.
    pub fn from_value(context: &str, value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => Ok(Self::Listings(items)),
            Value::Object(map) => Ok(Self::Wrapped(map)),
            other => Err(AppError::response(
                context,
                format!("expected a JSON array or object, got {other}"),
            )),
        }
    }
}

/// Service for calling job listing APIs.
pub struct ApiCollector {
    client: Client,
}

impl ApiCollector {
    /// Create a collector sharing the given HTTP client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// GET the target's endpoint with its headers.
    ///
    /// Returns `None` when the API answers with a non-success status.
    pub async fn fetch(&self, employer: &str, target: &ApiTarget) -> Result<Option<ApiPayload>> {
        log::debug!("Calling job API for {}: {}", employer, target.url);

        let headers = header_map(&target.headers)?;
        let Some(body) = fetch_text(&self.client, &target.url, headers).await? else {
            return Ok(None);
        };

        let value: Value = serde_json::from_str(&body)?;
        ApiPayload::from_value(employer, value).map(Some)
    }
}
