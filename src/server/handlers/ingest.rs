use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value;

use crate::kb::KnowledgeBaseProvider;
use crate::server::envelope::Envelope;
use crate::state::AppState;

/// Ingestion Trigger: the request payload is logged for traceability but
/// carries no decision data. No idempotency guard; concurrent triggers may
/// start concurrent jobs and the service is expected to arbitrate.
pub async fn trigger_ingestion(
    State(state): State<Arc<AppState>>,
    payload: Option<Json<Value>>,
) -> impl IntoResponse {
    if let Some(Json(event)) = payload {
        tracing::info!(event = %event, "ingestion trigger invoked");
    } else {
        tracing::info!("ingestion trigger invoked with empty payload");
    }

    handle_ingestion(state.kb.as_ref()).await
}

pub async fn handle_ingestion(provider: &dyn KnowledgeBaseProvider) -> Envelope {
    match provider.start_ingestion_job().await {
        Ok(response) => {
            tracing::info!(
                job_id = %response.ingestion_job.ingestion_job_id,
                status = %response.ingestion_job.status,
                "ingestion job started"
            );
            Envelope::ok(&response)
        }
        Err(err) => {
            tracing::error!("start_ingestion_job failed: {}", err);
            Envelope::error(err)
        }
    }
}
