use reqwest::Client;
use serde_json::Value;

use super::envelope::unwrap_envelope;
use super::session::ChatSession;
use crate::core::errors::ChatError;

/// What the UI should show for one round trip, in order. Events are render
/// instructions, not state: the session history only ever gains the user
/// message and, on success, the assistant answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    /// The assistant's answer text.
    Answer(String),
    /// Supplementary source block; only emitted when both parts are present.
    Source { context: String, doc_url: String },
    /// Explicit notice that the answer came back without a usable citation.
    NoSource,
    /// The handler reported a non-200 status with this message.
    UpstreamError(String),
    /// The round trip itself failed (network or either decode layer).
    CallFailed(String),
}

pub struct ChatClient {
    endpoint: String,
    client: Client,
}

impl ChatClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Client::new(),
        }
    }

    /// One user submission: append the user message, perform the blocking
    /// round trip, and interpret the outcome. The user message stays in the
    /// session whatever happens afterwards.
    pub async fn ask(&self, session: &mut ChatSession, prompt: &str) -> Vec<RenderEvent> {
        session.push_user(prompt);

        match self.round_trip(prompt).await {
            Ok(events) => {
                if let Some(RenderEvent::Answer(text)) = events.first() {
                    session.push_assistant(text);
                }
                events
            }
            Err(err) => vec![RenderEvent::CallFailed(err.to_string())],
        }
    }

    async fn round_trip(&self, prompt: &str) -> Result<Vec<RenderEvent>, ChatError> {
        let res = self
            .client
            .get(&self.endpoint)
            .query(&[("prompt", prompt)])
            .send()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        let inner = unwrap_envelope(&text)?;

        if status.is_success() {
            Ok(success_events(&inner))
        } else {
            let message = inner
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("Unknown error")
                .to_string();
            Ok(vec![RenderEvent::UpstreamError(message)])
        }
    }
}

fn success_events(inner: &Value) -> Vec<RenderEvent> {
    let answer = inner
        .get("answer")
        .and_then(Value::as_str)
        .unwrap_or("No answer returned.")
        .to_string();
    let context = inner
        .get("context")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();
    let doc_url = inner
        .get("doc_url")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();

    let mut events = vec![RenderEvent::Answer(answer)];
    if !context.is_empty() && !doc_url.is_empty() {
        events.push(RenderEvent::Source { context, doc_url });
    } else {
        events.push(RenderEvent::NoSource);
    }
    events
}
