use std::sync::Arc;

use thiserror::Error;

use crate::core::config::{AppConfig, AppPaths, ConfigService};
use crate::kb::{KnowledgeBaseProvider, RemoteKbClient};

/// Global application state shared across all routes and the background
/// sync task.
#[derive(Clone)]
pub struct AppState {
    pub paths: Arc<AppPaths>,
    pub config_service: ConfigService,
    pub config: AppConfig,
    pub kb: Arc<dyn KnowledgeBaseProvider>,
}

#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("Failed to load configuration: {0}")]
    Config(#[source] anyhow::Error),
}

impl AppState {
    /// The caller installs the tracing subscriber before this runs so the
    /// unconfigured-identifier warnings are not dropped.
    pub fn initialize(paths: Arc<AppPaths>) -> Result<Arc<Self>, InitializationError> {
        let config_service = ConfigService::new(paths.clone());
        let config = config_service
            .load_config()
            .map_err(|e| InitializationError::Config(e.into()))?;

        for warning in startup_warnings(&config) {
            tracing::warn!("{}", warning);
        }

        let kb = Arc::new(RemoteKbClient::new(config.retrieval.clone()));

        Ok(Arc::new(AppState {
            paths,
            config_service,
            config,
            kb,
        }))
    }

    /// State backed by an arbitrary provider, for tests and embedding.
    pub fn with_provider(config: AppConfig, kb: Arc<dyn KnowledgeBaseProvider>) -> Arc<Self> {
        let paths = Arc::new(AppPaths::new());
        let config_service = ConfigService::new(paths.clone());
        Arc::new(AppState {
            paths,
            config_service,
            config,
            kb,
        })
    }
}

/// Human-readable warnings for deployment parameters that loaded empty.
/// Empty identifiers are not a load error (the original passed them through
/// unvalidated), but they guarantee upstream failures and deserve a notice.
pub fn startup_warnings(config: &AppConfig) -> Vec<String> {
    let mut warnings = Vec::new();
    if config.retrieval.knowledge_base_id.is_empty() {
        warnings.push(
            "retrieval.knowledge_base_id is not configured; queries will fail upstream"
                .to_string(),
        );
    }
    if config.retrieval.data_source_id.is_empty() {
        warnings.push(
            "retrieval.data_source_id is not configured; ingestion triggers will fail upstream"
                .to_string(),
        );
    }
    warnings
}
