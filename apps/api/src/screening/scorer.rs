//! Candidate scorer — one `ScoreRecord` per parsed resume, in input order.
//!
//! Failed parses are short-circuited into zero-score records without
//! spending a model call. Scoring failures for valid candidates are
//! isolated per candidate, exactly like parsing failures.

use anyhow::{Context, Result};
use tracing::warn;

use crate::extraction::StructuredExtractor;
use crate::models::candidate::ParsedResume;
use crate::models::job::JobRecord;
use crate::models::score::{CandidateScore, ScoreRecord, SCORE_SCHEMA};
use crate::screening::gather::gather_in_order;
use crate::screening::prompts::{SCORE_PROMPT_TEMPLATE, SCORE_SYSTEM};

/// Scores every candidate against the job record. Length and order are
/// preserved: `candidates.len()` in, the same number of records out.
pub async fn score_candidates(
    extractor: &StructuredExtractor,
    job: &JobRecord,
    candidates: Vec<ParsedResume>,
    max_concurrent: usize,
) -> Result<Vec<ScoreRecord>> {
    let job_json =
        serde_json::to_string_pretty(job).context("failed to serialize job record")?;

    let tasks: Vec<_> = candidates
        .into_iter()
        .map(|parsed| {
            let extractor = extractor.clone();
            let job_json = job_json.clone();
            async move { score_one(&extractor, &job_json, parsed).await }
        })
        .collect();

    gather_in_order(tasks, max_concurrent).await
}

async fn score_one(
    extractor: &StructuredExtractor,
    job_json: &str,
    parsed: ParsedResume,
) -> ScoreRecord {
    let candidate = match parsed {
        // No model call is wasted on unusable input.
        ParsedResume::Failed(failure) => return ScoreRecord::unprocessable(failure),
        ParsedResume::Candidate(ref c) => c.clone(),
    };

    let candidate_json = match serde_json::to_string_pretty(&candidate) {
        Ok(json) => json,
        Err(e) => {
            return ScoreRecord::scoring_failed(
                candidate.name,
                format!("failed to serialize candidate record: {e}"),
                parsed,
            )
        }
    };

    let prompt = SCORE_PROMPT_TEMPLATE
        .replace("{job_json}", job_json)
        .replace("{candidate_json}", &candidate_json);

    match extractor
        .extract::<CandidateScore>(&prompt, SCORE_SYSTEM, &SCORE_SCHEMA)
        .await
    {
        Ok(score) => ScoreRecord::from_parts(score, parsed),
        Err(e) => {
            warn!("scoring failed for {}: {e}", candidate.name);
            ScoreRecord::scoring_failed(
                candidate.name,
                format!("error in scoring response from model: {e}"),
                parsed,
            )
        }
    }
}
