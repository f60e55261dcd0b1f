use serde::{Deserialize, Serialize};

use super::types::RetrieveAndGenerateResponse;

/// Flattened payload the query handler returns: the generated answer plus the
/// excerpt and source URI of the first retrieved reference of the first
/// citation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalResult {
    pub answer: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub doc_url: String,
}

impl RetrievalResult {
    /// `context` and `doc_url` are populated both-or-neither: a reference
    /// that carries an excerpt without a source location (or vice versa) is
    /// reported as having no source at all, so the client never renders a
    /// citation it cannot link.
    pub fn from_response(response: &RetrieveAndGenerateResponse) -> Self {
        let first_reference = response
            .citations
            .first()
            .and_then(|citation| citation.retrieved_references.first());

        let context = first_reference
            .and_then(|reference| reference.content.as_ref())
            .map(|content| content.text.clone())
            .unwrap_or_default();
        let doc_url = first_reference
            .and_then(|reference| reference.location.as_ref())
            .and_then(|location| location.s3_location.as_ref())
            .map(|s3| s3.uri.clone())
            .unwrap_or_default();

        let (context, doc_url) = if context.is_empty() || doc_url.is_empty() {
            (String::new(), String::new())
        } else {
            (context, doc_url)
        };

        Self {
            answer: response.output.text.clone(),
            context,
            doc_url,
        }
    }
}
