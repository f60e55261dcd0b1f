use crate::core::errors::ApiError;

use super::service::AppConfig;

/// One week; anything longer is almost certainly a unit mistake.
const MAX_SYNC_INTERVAL_MINUTES: u64 = 10_080;

pub fn validate_config(config: &AppConfig) -> Result<(), ApiError> {
    validate_identifier("retrieval.knowledge_base_id", &config.retrieval.knowledge_base_id)?;
    validate_identifier("retrieval.data_source_id", &config.retrieval.data_source_id)?;
    validate_identifier("retrieval.region", &config.retrieval.region)?;

    if config.retrieval.region.is_empty() {
        return Err(field_error("retrieval.region", "must not be empty"));
    }

    if let Some(endpoint) = &config.retrieval.endpoint {
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(field_error(
                "retrieval.endpoint",
                "must be an http(s) URL",
            ));
        }
    }

    if config.ingestion.auto_sync_interval_minutes > MAX_SYNC_INTERVAL_MINUTES {
        return Err(field_error(
            "ingestion.auto_sync_interval_minutes",
            "must be at most 10080",
        ));
    }

    for origin in &config.server.cors_allowed_origins {
        if origin.trim().is_empty() {
            return Err(field_error(
                "server.cors_allowed_origins",
                "entries must be non-empty strings",
            ));
        }
    }

    Ok(())
}

// Identifiers may be empty (the deployment decides when they are required),
// but embedded whitespace is never valid and always a copy/paste accident.
fn validate_identifier(field: &str, value: &str) -> Result<(), ApiError> {
    if value.chars().any(char::is_whitespace) {
        return Err(field_error(field, "must not contain whitespace"));
    }
    Ok(())
}

fn field_error(field: &str, message: &str) -> ApiError {
    ApiError::BadRequest(format!("invalid config: {}: {}", field, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn whitespace_in_identifier_is_rejected() {
        let mut config = AppConfig::default();
        config.retrieval.knowledge_base_id = "KB 123".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("knowledge_base_id"));
    }

    #[test]
    fn non_http_endpoint_is_rejected() {
        let mut config = AppConfig::default();
        config.retrieval.endpoint = Some("ftp://example.com".to_string());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn oversized_sync_interval_is_rejected() {
        let mut config = AppConfig::default();
        config.ingestion.auto_sync_interval_minutes = 20_000;
        assert!(validate_config(&config).is_err());
    }
}
