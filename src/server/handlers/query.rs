use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::kb::{KnowledgeBaseProvider, RetrievalResult};
use crate::server::envelope::Envelope;
use crate::state::AppState;

/// The web client sends `prompt`; the handler's historical invocation field
/// is `query`. The route accepts both and `prompt` wins, which is the
/// reconciliation the original gateway mapping left implicit.
#[derive(Debug, Deserialize)]
pub struct KbQueryParams {
    pub prompt: Option<String>,
    pub query: Option<String>,
}

pub async fn kb_query(
    State(state): State<Arc<AppState>>,
    Query(params): Query<KbQueryParams>,
) -> impl IntoResponse {
    let question = params.prompt.or(params.query).unwrap_or_default();
    handle_query(state.kb.as_ref(), question.trim()).await
}

/// Query Handler: one synchronous retrieval-and-generation attempt, then
/// field extraction. The envelope statusCode is always 200 or 500; an empty
/// question short-circuits to 500 without an upstream call.
pub async fn handle_query(provider: &dyn KnowledgeBaseProvider, question: &str) -> Envelope {
    if question.is_empty() {
        return Envelope::error("query must be a non-empty string");
    }

    tracing::info!(question, "kb query received");

    match provider.retrieve_and_generate(question).await {
        Ok(response) => {
            let result = RetrievalResult::from_response(&response);
            Envelope::ok(&result)
        }
        Err(err) => {
            tracing::error!("retrieve_and_generate failed: {}", err);
            Envelope::error(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::core::errors::ApiError;
    use crate::kb::types::{
        Citation, GeneratedOutput, RetrieveAndGenerateResponse, StartIngestionJobResponse,
    };

    pub(crate) struct MockProvider {
        pub citations: Vec<Citation>,
        pub fail_with: Option<String>,
    }

    #[async_trait]
    impl KnowledgeBaseProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        async fn health_check(&self) -> Result<bool, ApiError> {
            Ok(true)
        }

        async fn retrieve_and_generate(
            &self,
            _question: &str,
        ) -> Result<RetrieveAndGenerateResponse, ApiError> {
            if let Some(message) = &self.fail_with {
                return Err(ApiError::Upstream(message.clone()));
            }
            Ok(RetrieveAndGenerateResponse {
                output: GeneratedOutput {
                    text: "Consideration is something of value exchanged.".to_string(),
                },
                citations: self.citations.clone(),
            })
        }

        async fn start_ingestion_job(&self) -> Result<StartIngestionJobResponse, ApiError> {
            Err(ApiError::Internal("not used in this test".to_string()))
        }
    }

    #[tokio::test]
    async fn successful_query_returns_200_envelope_with_encoded_result() {
        let provider = MockProvider {
            citations: vec![],
            fail_with: None,
        };
        let envelope = handle_query(&provider, "What is consideration?").await;

        assert_eq!(envelope.status_code, 200);
        let result: RetrievalResult = serde_json::from_str(&envelope.body).unwrap();
        assert_eq!(result.answer, "Consideration is something of value exchanged.");
        assert_eq!(result.context, "");
        assert_eq!(result.doc_url, "");
    }

    #[tokio::test]
    async fn upstream_failure_returns_500_envelope_with_error() {
        let provider = MockProvider {
            citations: vec![],
            fail_with: Some("ValidationException".to_string()),
        };
        let envelope = handle_query(&provider, "anything").await;

        assert_eq!(envelope.status_code, 500);
        let inner: serde_json::Value = serde_json::from_str(&envelope.body).unwrap();
        assert!(inner["error"].as_str().unwrap().contains("ValidationException"));
    }

    #[tokio::test]
    async fn empty_question_is_rejected_without_upstream_call() {
        struct PanicProvider;

        #[async_trait]
        impl KnowledgeBaseProvider for PanicProvider {
            fn name(&self) -> &str {
                "panic"
            }
            async fn health_check(&self) -> Result<bool, ApiError> {
                Ok(true)
            }
            async fn retrieve_and_generate(
                &self,
                _question: &str,
            ) -> Result<RetrieveAndGenerateResponse, ApiError> {
                panic!("upstream must not be called for an empty question");
            }
            async fn start_ingestion_job(&self) -> Result<StartIngestionJobResponse, ApiError> {
                panic!("not used");
            }
        }

        let envelope = handle_query(&PanicProvider, "").await;
        assert_eq!(envelope.status_code, 500);
        let inner: serde_json::Value = serde_json::from_str(&envelope.body).unwrap();
        assert!(inner["error"].as_str().unwrap().contains("non-empty"));
    }
}
