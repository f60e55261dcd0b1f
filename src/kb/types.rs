use serde::{Deserialize, Serialize};

/// Request body for the retrieve-and-generate call. Field names follow the
/// service's camelCase wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveAndGenerateRequest {
    pub input: GenerationInput,
    pub retrieve_and_generate_configuration: RetrieveAndGenerateConfiguration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationInput {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveAndGenerateConfiguration {
    pub knowledge_base_configuration: KnowledgeBaseConfiguration,
    #[serde(rename = "type")]
    pub configuration_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeBaseConfiguration {
    pub knowledge_base_id: String,
    pub model_arn: String,
}

impl RetrieveAndGenerateRequest {
    pub fn new(question: &str, knowledge_base_id: &str, model_arn: &str) -> Self {
        Self {
            input: GenerationInput {
                text: question.to_string(),
            },
            retrieve_and_generate_configuration: RetrieveAndGenerateConfiguration {
                knowledge_base_configuration: KnowledgeBaseConfiguration {
                    knowledge_base_id: knowledge_base_id.to_string(),
                    model_arn: model_arn.to_string(),
                },
                configuration_type: "KNOWLEDGE_BASE".to_string(),
            },
        }
    }
}

/// Nested response shape of the retrieve-and-generate call. `output.text` is
/// the generated answer and is required; a response without it is an
/// integration failure, not a degraded answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveAndGenerateResponse {
    pub output: GeneratedOutput,
    #[serde(default)]
    pub citations: Vec<Citation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedOutput {
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    #[serde(default)]
    pub retrieved_references: Vec<RetrievedReference>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RetrievedReference {
    pub content: Option<ReferenceContent>,
    pub location: Option<ReferenceLocation>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceContent {
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReferenceLocation {
    pub s3_location: Option<S3Location>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct S3Location {
    pub uri: String,
}

/// Response of the start-ingestion-job call. The trigger handler forwards
/// this verbatim; only the id and status are read locally for logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartIngestionJobResponse {
    pub ingestion_job: IngestionJob,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IngestionJob {
    pub ingestion_job_id: String,
    pub knowledge_base_id: String,
    pub data_source_id: String,
    pub status: String,
}
