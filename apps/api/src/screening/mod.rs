//! Candidate screening pipeline.
//!
//! Flow: parse_job ∥ parse_resumes → score_candidates → rank → draft_emails.
//! Per-item failures flow through in-band as data; only two conditions abort
//! a run — the job description failing to parse, and every resume in the
//! batch failing.
//! All LLM calls go through the structured extractor — no direct client use.

pub mod document;
pub mod emailer;
mod gather;
pub mod handlers;
pub mod jd_parser;
pub mod prompts;
pub mod ranker;
pub mod resume_parser;
pub mod scorer;

use thiserror::Error;
use tracing::info;

use crate::extraction::StructuredExtractor;
use crate::models::candidate::{ParsedResume, ResumeFile};
use crate::models::job::JobRecord;
use crate::models::score::{EmailBatch, RankedCandidate};

pub use jd_parser::ParseError;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Fatal to the run: there is exactly one job description, so its
    /// failure has no finer isolation granularity.
    #[error("job description could not be parsed: {0}")]
    JobDescription(#[from] ParseError),

    /// Batch-fatal: every resume failed parsing. Scoring never runs.
    #[error("all {count} resumes failed to parse; nothing to score")]
    AllResumesUnreadable { count: usize },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Success payload of a full screening run.
#[derive(Debug, serde::Serialize)]
pub struct ScreeningOutcome {
    pub job: JobRecord,
    pub ranked: Vec<RankedCandidate>,
    pub emails: EmailBatch,
}

/// Runs the full pipeline. Stateless: every run is independent.
///
/// `top_x` is clamped to `[1, ranked.len()]` here, so the email drafter
/// never sees an out-of-range cutoff.
pub async fn run_pipeline(
    extractor: &StructuredExtractor,
    job_text: &str,
    files: Vec<ResumeFile>,
    top_x: usize,
    max_concurrent: usize,
) -> Result<ScreeningOutcome, PipelineError> {
    let batch_size = files.len();
    info!("screening run: {batch_size} resumes, top_x={top_x}");

    let job = jd_parser::parse_job(extractor, job_text).await?;
    info!("job description parsed: {}", job.title);

    let parsed = resume_parser::parse_resumes(extractor, files, max_concurrent).await?;
    let failed = parsed.iter().filter(|p| p.is_failed()).count();
    info!("resumes parsed: {} ok, {failed} failed", parsed.len() - failed);

    // Batch-fatal condition: stop before scoring so no model call is wasted.
    if !parsed.is_empty() && parsed.iter().all(ParsedResume::is_failed) {
        return Err(PipelineError::AllResumesUnreadable { count: batch_size });
    }

    let scores = scorer::score_candidates(extractor, &job, parsed, max_concurrent).await?;
    let ranked = ranker::rank(scores);

    let top_x = top_x.clamp(1, ranked.len().max(1));
    let emails = emailer::draft_emails(extractor, &ranked, &job, top_x, max_concurrent).await?;
    info!(
        "screening complete: {} ranked, {} invitations, {} rejections",
        ranked.len(),
        emails.invitations.len(),
        emails.rejections.len()
    );

    Ok(ScreeningOutcome { job, ranked, emails })
}
