//! Classification of push frames.
//!
//! The server sends one JSON object per text frame:
//!
//! ```text
//! { "type": "mention", "mention": { ... } }
//! { "type": "alert",   "alert":   { ... } }
//! ```
//!
//! Anything else is ignored.

use serde_json::Value;

use crate::error::SyncError;
use crate::store::Item;

/// Parses one frame payload.
///
/// Returns `Ok(Some(item))` for a recognised envelope, `Ok(None)` for valid
/// JSON of any other shape (unknown `type`, missing or `null` payload, payload
/// that is not a valid mention/alert, or a non-object value).
///
/// # Errors
///
/// Returns [`SyncError::FrameParse`] if the payload is not valid JSON.
pub fn parse_frame(payload: &str) -> Result<Option<Item>, SyncError> {
    let envelope: Value = serde_json::from_str(payload).map_err(SyncError::FrameParse)?;

    let item = match envelope.get("type").and_then(Value::as_str) {
        Some("mention") => take_payload(&envelope, "mention").map(Item::Mention),
        Some("alert") => take_payload(&envelope, "alert").map(Item::Alert),
        _ => None,
    };
    Ok(item)
}

fn take_payload<T: serde::de::DeserializeOwned>(envelope: &Value, field: &str) -> Option<T> {
    let payload = envelope.get(field).filter(|v| !v.is_null())?;
    match serde_json::from_value::<T>(payload.clone()) {
        Ok(item) => Some(item),
        Err(e) => {
            tracing::debug!(field, error = %e, "push payload does not match expected shape");
            None
        }
    }
}
