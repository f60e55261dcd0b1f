use async_trait::async_trait;

use super::types::{RetrieveAndGenerateResponse, StartIngestionJobResponse};
use crate::core::errors::ApiError;

#[async_trait]
pub trait KnowledgeBaseProvider: Send + Sync {
    /// return the provider name (e.g. "remote", "mock")
    fn name(&self) -> &str;

    /// check if the service endpoint is reachable
    async fn health_check(&self) -> Result<bool, ApiError>;

    /// one retrieval-and-generation round trip; single attempt, no retry
    async fn retrieve_and_generate(
        &self,
        question: &str,
    ) -> Result<RetrieveAndGenerateResponse, ApiError>;

    /// start an ingestion job for the configured knowledge base/data source
    async fn start_ingestion_job(&self) -> Result<StartIngestionJobResponse, ApiError>;
}
