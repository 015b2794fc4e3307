//! Provider response extraction.
//!
//! The provider body looks like:
//!
//! ```text
//! {"status": 200, "message": "...",
//!  "data": {"summary": {"courier": "...", "status": "..."},
//!           "history": [{"date": "...", "desc": "..."}]}}
//! ```
//!
//! Every field may be missing. Only a body that is not a JSON object fails
//! the whole call; missing leaves take deterministic defaults.

use parcelwatch_core::{HistoryEntry, Summary, TrackingResult};
use serde_json::Value;

use crate::error::{Result, TrackingError};

const SUCCESS: u16 = 200;
const NOT_FOUND_MESSAGE: &str = "shipment not found";

/// Turn a 2xx response body into a [`TrackingResult`].
pub fn parse_response(body: &str) -> Result<TrackingResult> {
    let json: Value =
        serde_json::from_str(body).map_err(|e| TrackingError::Parse(e.to_string()))?;
    if !json.is_object() {
        return Err(TrackingError::Parse("expected a JSON object".to_string()));
    }

    let status = status_code(&json);
    let message = provider_message(&json);

    if status != Some(SUCCESS) {
        return Err(TrackingError::ApiStatus {
            status,
            message: message.unwrap_or_else(|| NOT_FOUND_MESSAGE.to_string()),
        });
    }

    let data = json.get("data");
    let summary = data
        .and_then(|d| d.get("summary"))
        .map(summary_from)
        .unwrap_or_default();
    let history: Vec<HistoryEntry> = data
        .and_then(|d| d.get("history"))
        .and_then(Value::as_array)
        .map(|items| items.iter().map(history_entry_from).collect())
        .unwrap_or_default();

    Ok(TrackingResult {
        status_code: SUCCESS,
        message: message.unwrap_or_default(),
        summary,
        history,
    })
}

/// The top-level `message` field of a body, if it parses.
pub(crate) fn message_from_body(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(provider_message)
}

/// Provider status, accepting either a number or a numeric string.
fn status_code(json: &Value) -> Option<u16> {
    match json.get("status")? {
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn provider_message(json: &Value) -> Option<String> {
    json.get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

fn summary_from(summary: &Value) -> Summary {
    let defaults = Summary::default();
    Summary {
        courier: text(summary, "courier").unwrap_or(defaults.courier),
        status: text(summary, "status").unwrap_or(defaults.status),
    }
}

fn history_entry_from(item: &Value) -> HistoryEntry {
    HistoryEntry {
        date: text(item, "date").unwrap_or_else(|| "-".to_string()),
        description: text(item, "desc").unwrap_or_else(|| "-".to_string()),
    }
}

/// String leaf lookup; numbers are rendered, anything else is absent.
fn text(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
