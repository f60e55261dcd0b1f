use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::core::errors::ApiError;
use crate::state::AppState;

/// Read-only view of the running configuration with credential-looking
/// values masked.
pub async fn get_config(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let redacted = state.config_service.redacted_config(&state.config);
    Ok(Json(redacted))
}
