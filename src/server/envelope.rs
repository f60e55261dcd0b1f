use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Gateway-level wrapper around a handler's actual payload. `body` is a
/// JSON-encoded string, not an object: clients must decode the response
/// twice. The outer HTTP status mirrors `statusCode` so error branches work
/// for clients that only look at the transport status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl Envelope {
    pub fn ok<T: Serialize>(payload: &T) -> Self {
        let body = serde_json::to_string(payload).unwrap_or_else(|_| "{}".to_string());
        Self {
            status_code: 200,
            body,
        }
    }

    pub fn error<M: std::fmt::Display>(message: M) -> Self {
        Self {
            status_code: 500,
            body: json!({ "error": message.to_string() }).to_string(),
        }
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
