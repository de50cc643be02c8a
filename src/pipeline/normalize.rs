// src/pipeline/normalize.rs

//! Mapping of API payloads onto `JobListing`.

use serde_json::{Map, Value};

use crate::error::{AppError, Result};
use crate::models::{ApiTarget, JobListing};
use crate::services::ApiPayload;

/// Normalize an API payload using the target's field mapping.
///
/// `None` (the API answered with a non-success status) yields no listings.
pub fn normalize_api(
    employer: &str,
    payload: Option<ApiPayload>,
    target: &ApiTarget,
) -> Result<Vec<JobListing>> {
    let items = match payload {
        None => return Ok(Vec::new()),
        Some(ApiPayload::Listings(items)) => items,
        Some(ApiPayload::Wrapped(map)) => unwrap_listings(employer, map, target)?,
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| normalize_item(employer, index, item, target))
        .collect()
}

/// Descend into the configured key of an object-shaped response.
fn unwrap_listings(
    employer: &str,
    mut map: Map<String, Value>,
    target: &ApiTarget,
) -> Result<Vec<Value>> {
    let key = target.key.as_deref().ok_or_else(|| {
        AppError::response(employer, "response is an object but no `key` is configured")
    })?;

    match map.remove(key) {
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(AppError::response(
            employer,
            format!("`{key}` is not an array: {other}"),
        )),
        None => Err(AppError::response(
            employer,
            format!("response has no `{key}` field"),
        )),
    }
}

fn normalize_item(
    employer: &str,
    index: usize,
    item: &Value,
    target: &ApiTarget,
) -> Result<JobListing> {
    let Value::Object(fields) = item else {
        return Err(AppError::response(
            employer,
            format!("listing #{index} is not an object"),
        ));
    };

    let field = |name: &str| -> Result<String> {
        let value = fields.get(name).ok_or_else(|| {
            AppError::response(employer, format!("listing #{index} has no `{name}` field"))
        })?;
        scalar_text(value).ok_or_else(|| {
            AppError::response(
                employer,
                format!("listing #{index} field `{name}` is not text: {value}"),
            )
        })
    };

    let link = match target.link_field() {
        Some(name) => field(name)?,
        None => String::new(),
    };

    Ok(JobListing {
        employer: employer.to_string(),
        title: field(&target.title)?,
        location: field(&target.location)?,
        link,
    })
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
