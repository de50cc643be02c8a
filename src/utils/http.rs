// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use indexmap::IndexMap;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response};

use crate::error::{AppError, Result};
use crate::models::CrawlerConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_client(config: &CrawlerConfig) -> Result<Client> {
    let client = Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Build a header map from configured name/value pairs.
pub fn header_map(headers: &IndexMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| AppError::config(format!("Invalid header name '{name}': {e}")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| AppError::config(format!("Invalid value for header '{name}': {e}")))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

/// GET a URL and return the body text, or `None` on a non-success status.
///
/// A non-success status is logged and not treated as an error; transport
/// failures still are.
pub async fn fetch_text(client: &Client, url: &str, headers: HeaderMap) -> Result<Option<String>> {
    let response = client.get(url).headers(headers).send().await?;
    if !response.status().is_success() {
        log_failure(url, &response);
        return Ok(None);
    }
    Ok(Some(response.text().await?))
}

fn log_failure(url: &str, response: &Response) {
    log::warn!(
        "Failed to fetch {}. HTTP Status Code: {}",
        url,
        response.status().as_u16()
    );
}
