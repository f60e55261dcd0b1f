use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::provider::KnowledgeBaseProvider;
use super::types::{
    RetrieveAndGenerateRequest, RetrieveAndGenerateResponse, StartIngestionJobResponse,
};
use crate::core::config::RetrievalConfig;
use crate::core::errors::ApiError;

/// HTTP client for the managed retrieval-and-generation service. The base
/// URL comes from the retrieval config; request signing is the deployment's
/// concern (a gateway or sidecar), not this client's.
#[derive(Clone)]
pub struct RemoteKbClient {
    config: RetrievalConfig,
    base_url: String,
    client: Client,
}

impl RemoteKbClient {
    pub fn new(config: RetrievalConfig) -> Self {
        let base_url = config.base_url();
        Self {
            config,
            base_url,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl KnowledgeBaseProvider for RemoteKbClient {
    fn name(&self) -> &str {
        "remote"
    }

    async fn health_check(&self) -> Result<bool, ApiError> {
        // Any HTTP response counts as reachable; the service rejects
        // unauthenticated probes with an error status.
        match self.client.get(&self.base_url).send().await {
            Ok(_) => Ok(true),
            Err(_) => Ok(false),
        }
    }

    async fn retrieve_and_generate(
        &self,
        question: &str,
    ) -> Result<RetrieveAndGenerateResponse, ApiError> {
        let url = format!(
            "{}/knowledgebases/{}/retrieveandgenerate",
            self.base_url, self.config.knowledge_base_id
        );
        let request = RetrieveAndGenerateRequest::new(
            question,
            &self.config.knowledge_base_id,
            &self.config.model_arn,
        );

        let res = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(ApiError::upstream)?;

        if !res.status().is_success() {
            return Err(ApiError::Upstream(upstream_message(
                "retrieve_and_generate",
                res,
            )
            .await));
        }

        res.json::<RetrieveAndGenerateResponse>()
            .await
            .map_err(|e| ApiError::Upstream(format!("malformed retrieval response: {}", e)))
    }

    async fn start_ingestion_job(&self) -> Result<StartIngestionJobResponse, ApiError> {
        let url = format!(
            "{}/knowledgebases/{}/datasources/{}/ingestionjobs",
            self.base_url, self.config.knowledge_base_id, self.config.data_source_id
        );

        let res = self
            .client
            .put(&url)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(ApiError::upstream)?;

        if !res.status().is_success() {
            return Err(ApiError::Upstream(
                upstream_message("start_ingestion_job", res).await,
            ));
        }

        res.json::<StartIngestionJobResponse>()
            .await
            .map_err(|e| ApiError::Upstream(format!("malformed ingestion response: {}", e)))
    }
}

/// Builds an error string from a non-success upstream response, preferring
/// the service's own `message` field over the raw body.
async fn upstream_message(operation: &str, res: reqwest::Response) -> String {
    let status = res.status();
    let text = res.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<Value>(&text)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .or_else(|| value.get("error"))
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
        })
        .unwrap_or(text);
    format!("{} returned {}: {}", operation, status, detail)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::extract::State;
    use axum::routing::{post, put};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use tokio::net::TcpListener;
    use tokio::sync::Mutex;

    use super::*;

    /// Minimal stand-in for the managed service that records the request
    /// bodies it receives.
    async fn spawn_upstream(seen: Arc<Mutex<Vec<Value>>>) -> String {
        async fn generate(
            State(seen): State<Arc<Mutex<Vec<Value>>>>,
            Json(body): Json<Value>,
        ) -> Json<Value> {
            seen.lock().await.push(body);
            Json(json!({
                "output": {"text": "Consideration is something of value exchanged."},
                "citations": [{
                    "retrievedReferences": [{
                        "content": {"text": "A promise is binding when supported by consideration."},
                        "location": {"s3Location": {"uri": "s3://legal-kb/contract-law.pdf"}}
                    }]
                }]
            }))
        }

        async fn ingest(
            State(seen): State<Arc<Mutex<Vec<Value>>>>,
            Json(body): Json<Value>,
        ) -> Json<Value> {
            seen.lock().await.push(body);
            Json(json!({
                "ingestionJob": {
                    "ingestionJobId": "job-42",
                    "knowledgeBaseId": "KB123",
                    "dataSourceId": "DS456",
                    "status": "STARTING"
                }
            }))
        }

        let app = Router::new()
            .route(
                "/knowledgebases/:kb/retrieveandgenerate",
                post(generate),
            )
            .route(
                "/knowledgebases/:kb/datasources/:ds/ingestionjobs",
                put(ingest),
            )
            .with_state(seen);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn test_config(endpoint: String) -> RetrievalConfig {
        RetrievalConfig {
            knowledge_base_id: "KB123".to_string(),
            data_source_id: "DS456".to_string(),
            model_arn: "arn:aws:bedrock:us-east-1::foundation-model/test".to_string(),
            region: "us-east-1".to_string(),
            endpoint: Some(endpoint),
        }
    }

    #[tokio::test]
    async fn retrieve_and_generate_posts_configured_request() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let endpoint = spawn_upstream(seen.clone()).await;
        let client = RemoteKbClient::new(test_config(endpoint));

        let response = client
            .retrieve_and_generate("What is consideration in contract law?")
            .await
            .unwrap();

        assert_eq!(
            response.output.text,
            "Consideration is something of value exchanged."
        );
        assert_eq!(response.citations.len(), 1);

        let requests = seen.lock().await;
        let sent = &requests[0];
        assert_eq!(sent["input"]["text"], "What is consideration in contract law?");
        assert_eq!(
            sent["retrieveAndGenerateConfiguration"]["knowledgeBaseConfiguration"]
                ["knowledgeBaseId"],
            "KB123"
        );
        assert_eq!(
            sent["retrieveAndGenerateConfiguration"]["type"],
            "KNOWLEDGE_BASE"
        );
    }

    #[tokio::test]
    async fn start_ingestion_job_hits_data_source_route() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let endpoint = spawn_upstream(seen.clone()).await;
        let client = RemoteKbClient::new(test_config(endpoint));

        let response = client.start_ingestion_job().await.unwrap();
        assert_eq!(response.ingestion_job.ingestion_job_id, "job-42");
        assert_eq!(response.ingestion_job.status, "STARTING");
    }

    #[tokio::test]
    async fn upstream_error_message_is_surfaced() {
        async fn reject() -> (axum::http::StatusCode, Json<Value>) {
            (
                axum::http::StatusCode::BAD_REQUEST,
                Json(json!({"message": "ValidationException"})),
            )
        }

        let app = Router::new().route(
            "/knowledgebases/:kb/retrieveandgenerate",
            post(reject),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = RemoteKbClient::new(test_config(format!("http://{}", addr)));
        let err = client.retrieve_and_generate("").await.unwrap_err();
        assert!(err.to_string().contains("ValidationException"));
    }
}
