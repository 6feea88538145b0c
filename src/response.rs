//! RESTCONF response handling
//!
//! Maps HTTP status codes onto [`RestconfError`] and decodes JSON bodies.

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{RestconfError, Result};
use crate::http_types::{Method, Response};

/// Fail with the matching error variant unless the status is 2xx
pub fn check_status(response: &Response, url: &str) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }

    let status = response.status;
    let message = error_message(&response.body);
    warn!(status, url, %message, "RESTCONF request failed");

    let url = url.to_string();
    Err(match status {
        400 => RestconfError::Validation { url, message },
        401 | 403 => RestconfError::Auth {
            status,
            url,
            message,
        },
        404 => RestconfError::NotFound { url, message },
        500..=599 => RestconfError::Server {
            status,
            url,
            message,
        },
        _ => RestconfError::UnexpectedStatus {
            status,
            url,
            message,
        },
    })
}

/// Check the status and decode the body of a response
///
/// 201 Created and 204 No Content decode to `None`, as does an empty body.
pub fn decode(method: Method, response: &Response, url: &str) -> Result<Option<Value>> {
    check_status(response, url)?;

    if !method.expected_status().contains(&response.status) {
        warn!(%method, status = response.status, url, "unexpected success status");
    }

    if matches!(response.status, 201 | 204) {
        debug!(%method, status = response.status, url, "no content");
        return Ok(None);
    }

    decode_body(&response.body)
}

/// Decode a raw body: empty means `None`, anything else must be JSON
pub fn decode_body(body: &[u8]) -> Result<Option<Value>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| RestconfError::MalformedResponse {
            message: format!("invalid JSON body: {e}"),
            body: String::from_utf8_lossy(body).into_owned(),
        })
}

/// Extract `error-message` from a RESTCONF error document (RFC 8040
/// section 7.1), falling back to the raw body
pub fn error_message(body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|doc| {
            let errors = doc.get("ietf-restconf:errors").or_else(|| doc.get("errors"))?;
            errors
                .get("error")?
                .get(0)?
                .get("error-message")?
                .as_str()
                .map(str::to_string)
        })
        .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string())
}

/// Take the single member of `value` named `key`
pub fn unwrap_member(value: Value, key: &str) -> Result<Value> {
    match value {
        Value::Object(mut map) if map.contains_key(key) => Ok(map.remove(key).unwrap_or_default()),
        other => Err(RestconfError::MalformedResponse {
            message: format!("missing member {key:?}"),
            body: other.to_string(),
        }),
    }
}
