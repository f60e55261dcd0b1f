use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::paths::AppPaths;
use super::validation::validate_config;
use crate::core::errors::ApiError;

const REDACT_PLACEHOLDER: &str = "****";

const SENSITIVE_PATTERNS: [&str; 6] = [
    "api_key",
    "secret",
    "password",
    "_token",
    "credential",
    "access_key",
];

/// Connection parameters for the managed knowledge-base service. These were
/// hard-coded deployment constants in earlier revisions; they are now loaded
/// from `config.yml` and overridable per field via `CASECRUX_*` env vars.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub knowledge_base_id: String,
    pub data_source_id: String,
    pub model_arn: String,
    pub region: String,
    /// Explicit base URL for the service. When unset the URL is derived
    /// from `region`.
    pub endpoint: Option<String>,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            knowledge_base_id: String::new(),
            data_source_id: String::new(),
            model_arn: String::new(),
            region: "us-east-1".to_string(),
            endpoint: None,
        }
    }
}

impl RetrievalConfig {
    pub fn base_url(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://bedrock-agent-runtime.{}.amazonaws.com", self.region),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_allowed_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestionConfig {
    /// Cadence of the background sync trigger. Zero disables it.
    pub auto_sync_interval_minutes: u64,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            auto_sync_interval_minutes: 0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub retrieval: RetrievalConfig,
    pub server: ServerConfig,
    pub ingestion: IngestionConfig,
}

#[derive(Clone)]
pub struct ConfigService {
    paths: Arc<AppPaths>,
}

impl ConfigService {
    pub fn new(paths: Arc<AppPaths>) -> Self {
        Self { paths }
    }

    pub fn config_path(&self) -> PathBuf {
        if let Ok(path) = env::var("CASECRUX_CONFIG_PATH") {
            return PathBuf::from(path);
        }

        let user_config = self.paths.user_data_dir.join("config.yml");
        if user_config.exists() {
            return user_config;
        }

        self.paths.project_root.join("config.yml")
    }

    pub fn load_config(&self) -> Result<AppConfig, ApiError> {
        let path = self.config_path();
        let mut config = if path.exists() {
            let contents = fs::read_to_string(&path).map_err(|e| {
                ApiError::internal(format!("Failed to read {}: {}", path.display(), e))
            })?;
            serde_yaml::from_str::<AppConfig>(&contents).map_err(|e| {
                ApiError::internal(format!("Failed to parse {}: {}", path.display(), e))
            })?
        } else {
            AppConfig::default()
        };

        apply_env_overrides(&mut config);
        validate_config(&config)?;
        Ok(config)
    }

    /// JSON view of the config with credential-looking values masked, for
    /// the read-only config endpoint.
    pub fn redacted_config(&self, config: &AppConfig) -> Value {
        let value = serde_json::to_value(config).unwrap_or(Value::Null);
        redact_sensitive_values(&value)
    }
}

fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(value) = env::var("CASECRUX_KNOWLEDGE_BASE_ID") {
        config.retrieval.knowledge_base_id = value;
    }
    if let Ok(value) = env::var("CASECRUX_DATA_SOURCE_ID") {
        config.retrieval.data_source_id = value;
    }
    if let Ok(value) = env::var("CASECRUX_MODEL_ARN") {
        config.retrieval.model_arn = value;
    }
    if let Ok(value) = env::var("CASECRUX_REGION") {
        config.retrieval.region = value;
    }
    if let Ok(value) = env::var("CASECRUX_KB_ENDPOINT") {
        config.retrieval.endpoint = Some(value);
    }
}

fn redact_sensitive_values(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = serde_json::Map::new();
            for (key, val) in map {
                if is_sensitive_key(key) && val.is_string() {
                    out.insert(key.clone(), Value::String(REDACT_PLACEHOLDER.to_string()));
                } else {
                    out.insert(key.clone(), redact_sensitive_values(val));
                }
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(redact_sensitive_values).collect()),
        other => other.clone(),
    }
}

fn is_sensitive_key(key: &str) -> bool {
    let lowered = key.to_lowercase();
    SENSITIVE_PATTERNS
        .iter()
        .any(|pattern| lowered.contains(pattern))
}
