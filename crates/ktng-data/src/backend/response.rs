//! Validation of the backend response envelope.
//!
//! Checks run in a fixed order and the first violation aborts the export:
//! HTTP status, upstream error object, shape of `data`, then each record.

use crate::error::{DataError, Result};
use crate::record::FinancialRecord;
use reqwest::StatusCode;
use serde_json::Value;

/// Fail with [`DataError::Network`] unless the status is a success.
///
/// The message carries the status code and its reason phrase.
pub fn check_status(status: StatusCode) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }

    let reason = status.canonical_reason().unwrap_or("Unknown Status");
    Err(DataError::Network(format!("{} {}", status.as_u16(), reason)))
}

/// Validate a decoded response body and extract its records.
///
/// # Errors
/// - [`DataError::Upstream`] when `data` is an object with an `error` member
/// - [`DataError::Format`] when there is no `data` array or a record is malformed
pub fn validate_envelope(body: Value) -> Result<Vec<FinancialRecord>> {
    let data = match body {
        Value::Object(mut envelope) => envelope.remove("data"),
        _ => None,
    }
    .ok_or_else(|| DataError::Format("response has no `data` member".to_string()))?;

    if let Some(message) = upstream_error(&data) {
        return Err(DataError::Upstream(message));
    }

    let Value::Array(items) = data else {
        return Err(DataError::Format(format!(
            "`data` is {}, expected an array",
            type_name(&data)
        )));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item)
                .map_err(|e| DataError::Format(format!("record {}: {}", index, e)))
        })
        .collect()
}

/// Message of an `{ "error": ... }` object, if the member is set.
///
/// Unset means absent, `null`, `false`, zero or the empty string.
fn upstream_error(data: &Value) -> Option<String> {
    match data.get("error")? {
        Value::String(message) if !message.is_empty() => Some(message.clone()),
        Value::Null | Value::Bool(false) | Value::String(_) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
