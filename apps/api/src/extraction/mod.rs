//! Structured Extraction Service — wraps one model call with a target schema.
//!
//! The extractor builds the instruction text from a `Schema` descriptor,
//! invokes the provider exactly once, strips formatting artifacts, and runs
//! the response through strict validation before decoding into the typed
//! record. Retry policy belongs to callers.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::llm_client::{LlmError, ModelProvider};

pub mod schema;

pub use schema::Schema;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("model provider error: {0}")]
    Provider(#[from] LlmError),

    #[error("model returned a blank response")]
    EmptyResponse,

    #[error("schema violation: {0}")]
    SchemaViolation(String),
}

/// The single seam between the pipeline and the external model provider.
/// Cheap to clone — provider is shared behind an `Arc`.
#[derive(Clone)]
pub struct StructuredExtractor {
    provider: Arc<dyn ModelProvider>,
    deadline: Option<Duration>,
}

impl StructuredExtractor {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            provider,
            deadline: None,
        }
    }

    /// Sets a per-call deadline. Calls that exceed it fail with a
    /// provider timeout error.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Asks the model for a record conforming to `schema` and decodes it
    /// into `T`. The schema's field list is appended to the prompt, and the
    /// cleaned response must pass schema validation before decode.
    pub async fn extract<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
        schema: &Schema,
    ) -> Result<T, ExtractionError> {
        let full_prompt = format!("{prompt}\n\n{}", schema.instructions());
        let text = self.complete(&full_prompt, system).await?;

        // Fences come off first, so a bare ``` ``` pair still counts as blank.
        let cleaned = strip_json_fences(&text);
        if cleaned.trim().is_empty() {
            return Err(ExtractionError::EmptyResponse);
        }
        let value: serde_json::Value = serde_json::from_str(cleaned).map_err(|e| {
            ExtractionError::SchemaViolation(format!(
                "{} response is not valid JSON: {e}",
                schema.name
            ))
        })?;

        schema
            .validate(&value)
            .map_err(ExtractionError::SchemaViolation)?;

        serde_json::from_value(value).map_err(|e| {
            ExtractionError::SchemaViolation(format!(
                "{} response failed to decode: {e}",
                schema.name
            ))
        })
    }

    /// Raw free-text completion under the same deadline policy. Used by the
    /// email drafter, which has no target schema.
    pub async fn complete(&self, prompt: &str, system: &str) -> Result<String, ExtractionError> {
        let call = self.provider.complete(prompt, system);
        let text = match self.deadline {
            Some(deadline) => tokio::time::timeout(deadline, call)
                .await
                .map_err(|_| ExtractionError::Provider(LlmError::Timeout))??,
            None => call.await?,
        };
        Ok(text)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{FailingProvider, StaticProvider};
    use super::*;
    use crate::models::job::{JobRecord, JOB_SCHEMA};

    fn extractor_returning(text: &str) -> StructuredExtractor {
        StructuredExtractor::new(Arc::new(StaticProvider(text.to_string())))
    }

    const JOB_JSON: &str = r#"{
        "title": "Senior Backend Engineer",
        "company": "Acme",
        "location": "Berlin",
        "requirements": ["5+ years Go", "distributed systems"],
        "responsibilities": ["design services"],
        "benefits": ["remote"],
        "experience": "5+ years"
    }"#;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[tokio::test]
    async fn test_schema_round_trip_through_stub_provider() {
        // A well-formed echo from the "model" recovers the same field values.
        let extractor = extractor_returning(JOB_JSON);
        let job: JobRecord = extractor
            .extract("Extract the job details.", "system", &JOB_SCHEMA)
            .await
            .unwrap();

        assert_eq!(job.title, "Senior Backend Engineer");
        assert_eq!(job.company.as_deref(), Some("Acme"));
        assert_eq!(job.requirements.len(), 2);
        assert_eq!(job.experience.as_deref(), Some("5+ years"));
    }

    #[tokio::test]
    async fn test_fenced_response_is_cleaned_before_decode() {
        let fenced = format!("```json\n{JOB_JSON}\n```");
        let extractor = extractor_returning(&fenced);
        let job: JobRecord = extractor
            .extract("Extract the job details.", "system", &JOB_SCHEMA)
            .await
            .unwrap();
        assert_eq!(job.title, "Senior Backend Engineer");
    }

    #[tokio::test]
    async fn test_blank_response_is_empty_response_error() {
        let extractor = extractor_returning("   \n  ");
        let result: Result<JobRecord, _> = extractor
            .extract("Extract the job details.", "system", &JOB_SCHEMA)
            .await;
        assert!(matches!(result, Err(ExtractionError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_empty_fence_pair_is_empty_response_error() {
        let extractor = extractor_returning("```\n```");
        let result: Result<JobRecord, _> = extractor
            .extract("Extract the job details.", "system", &JOB_SCHEMA)
            .await;
        assert!(matches!(result, Err(ExtractionError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_missing_required_field_is_schema_violation() {
        let extractor = extractor_returning(r#"{"company": "Acme"}"#);
        let result: Result<JobRecord, _> = extractor
            .extract("Extract the job details.", "system", &JOB_SCHEMA)
            .await;
        match result {
            Err(ExtractionError::SchemaViolation(msg)) => assert!(msg.contains("title")),
            other => panic!("expected SchemaViolation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let extractor = StructuredExtractor::new(Arc::new(FailingProvider));
        let result: Result<JobRecord, _> = extractor
            .extract("Extract the job details.", "system", &JOB_SCHEMA)
            .await;
        assert!(matches!(result, Err(ExtractionError::Provider(_))));
    }
}
