use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::state::AppState;

pub async fn health(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "ok"
    }))
}

pub async fn get_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let kb_reachable = state.kb.health_check().await.unwrap_or(false);
    Json(json!({
        "status": "ok",
        "provider": state.kb.name(),
        "kb_reachable": kb_reachable,
    }))
}
