//! Error-body decoding
//!
//! The backend reports failures as `{"detail": ...}`; `detail` is usually a
//! string but request-validation failures carry a JSON structure. Some
//! proxies answer with `{"msg": "..."}` instead.

use serde_json::Value;

/// Pull a user-facing message out of an error response body.
pub fn extract_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;

    match value.get("detail") {
        Some(Value::String(detail)) if !detail.is_empty() => return Some(detail.clone()),
        Some(Value::Null) | None => {}
        Some(Value::String(_)) => {}
        Some(other) => return Some(other.to_string()),
    }

    value
        .get("msg")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(ToString::to_string)
}
