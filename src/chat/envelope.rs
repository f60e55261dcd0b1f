use serde_json::Value;

use crate::core::errors::ChatError;

/// Two-stage decode of the gateway response.
///
/// Stage 1 parses the response text as JSON, yielding the gateway envelope.
/// Stage 2 parses the envelope's `body` field -- a string holding a second
/// JSON document -- into the handler's actual payload. Some deployment
/// configurations unwrap the envelope at the gateway; a missing `body`
/// therefore falls back to `"{}"` rather than failing, and the caller's
/// field defaults take over.
pub fn unwrap_envelope(text: &str) -> Result<Value, ChatError> {
    let outer: Value =
        serde_json::from_str(text).map_err(|e| ChatError::OuterDecode(e.to_string()))?;

    // A missing body means the gateway already unwrapped the envelope; a
    // present but non-string body is a malformed envelope, not a valid
    // second document.
    let body = match outer.get("body") {
        None => "{}",
        Some(Value::String(body)) => body.as_str(),
        Some(other) => {
            return Err(ChatError::InnerDecode(format!(
                "envelope body is not a string: {}",
                other
            )))
        }
    };

    serde_json::from_str(body).map_err(|e| ChatError::InnerDecode(e.to_string()))
}
