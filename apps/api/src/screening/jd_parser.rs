//! Job description parser — raw text in, structured `JobRecord` out.
//!
//! All-or-nothing per job description: there is exactly one per run, so a
//! malformed record is never partially accepted and no retry happens here.

use thiserror::Error;

use crate::extraction::{ExtractionError, StructuredExtractor};
use crate::models::job::{JobRecord, JOB_SCHEMA};
use crate::screening::prompts::{JOB_PARSE_PROMPT_TEMPLATE, JOB_PARSE_SYSTEM};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("job description text is empty")]
    EmptyInput,

    #[error("job description extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
}

/// Parses a raw job description into a `JobRecord`. Missing optional fields
/// resolve to `None`/empty, never fabricated values.
pub async fn parse_job(
    extractor: &StructuredExtractor,
    raw_text: &str,
) -> Result<JobRecord, ParseError> {
    if raw_text.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let prompt = JOB_PARSE_PROMPT_TEMPLATE.replace("{jd_text}", raw_text);
    Ok(extractor
        .extract::<JobRecord>(&prompt, JOB_PARSE_SYSTEM, &JOB_SCHEMA)
        .await?)
}
