//! Email drafter — invitations for the top-ranked candidates, rejections
//! for the rest.
//!
//! Candidates whose record is an unprocessable placeholder are skipped —
//! there is no usable contact identity. A failing model call yields a draft
//! whose body states the error; it never aborts the batch.

use anyhow::{Context, Result};
use tracing::warn;

use crate::extraction::StructuredExtractor;
use crate::models::job::JobRecord;
use crate::models::score::{EmailBatch, EmailDraft, RankedCandidate};
use crate::screening::gather::gather_in_order;
use crate::screening::prompts::{EMAIL_SYSTEM, INVITE_PROMPT_TEMPLATE, REJECT_PROMPT_TEMPLATE};

/// Drafts one email per eligible ranked candidate. Among eligible
/// candidates, rank index `< top_x` gets an invitation, the rest get
/// rejections. `top_x` is clamped by the caller, not validated here.
pub async fn draft_emails(
    extractor: &StructuredExtractor,
    ranked: &[RankedCandidate],
    job: &JobRecord,
    top_x: usize,
    max_concurrent: usize,
) -> Result<EmailBatch> {
    let job_json =
        serde_json::to_string_pretty(job).context("failed to serialize job record")?;

    let tasks: Vec<_> = ranked
        .iter()
        .filter(|candidate| !candidate.score.resume.is_failed())
        .enumerate()
        .map(|(rank, candidate)| {
            let extractor = extractor.clone();
            let job_json = job_json.clone();
            let candidate = candidate.clone();
            let invite = rank < top_x;
            async move {
                let draft = draft_one(&extractor, &job_json, &candidate, invite).await;
                (invite, draft)
            }
        })
        .collect();

    let drafts = gather_in_order(tasks, max_concurrent).await?;

    let mut batch = EmailBatch::default();
    for (invite, draft) in drafts {
        if invite {
            batch.invitations.push(draft);
        } else {
            batch.rejections.push(draft);
        }
    }
    Ok(batch)
}

async fn draft_one(
    extractor: &StructuredExtractor,
    job_json: &str,
    candidate: &RankedCandidate,
    invite: bool,
) -> EmailDraft {
    let name = candidate.score.name.clone();

    let evaluation_json = match serde_json::to_string_pretty(candidate) {
        Ok(json) => json,
        Err(e) => {
            return EmailDraft {
                name,
                email_body: format!("Error generating email: {e}"),
            }
        }
    };

    let template = if invite {
        INVITE_PROMPT_TEMPLATE
    } else {
        REJECT_PROMPT_TEMPLATE
    };
    let prompt = template
        .replace("{job_json}", job_json)
        .replace("{evaluation_json}", &evaluation_json);

    match extractor.complete(&prompt, EMAIL_SYSTEM).await {
        Ok(body) => EmailDraft {
            name,
            email_body: body,
        },
        Err(e) => {
            warn!("email draft failed for {name}: {e}");
            EmailDraft {
                name,
                email_body: format!("Error generating email: {e}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::test_support::{FailingProvider, KeyedProvider};
    use crate::models::candidate::{CandidateRecord, ExtractionFailure, ParsedResume};
    use crate::models::score::ScoreRecord;
    use std::sync::Arc;

    fn job() -> JobRecord {
        JobRecord {
            title: "Senior Backend Engineer".to_string(),
            company: None,
            location: None,
            requirements: vec![],
            responsibilities: vec![],
            benefits: vec![],
            experience: None,
        }
    }

    fn eligible(name: &str, overall: u8) -> RankedCandidate {
        RankedCandidate::from_score(ScoreRecord {
            name: name.to_string(),
            relevance: overall,
            experience: overall,
            skills: overall,
            overall,
            comment: "ok".to_string(),
            resume: ParsedResume::Candidate(CandidateRecord {
                name: name.to_string(),
                work_experiences: vec![],
                location: String::new(),
                skills: vec![],
                education: vec![],
                summary: None,
                certifications: None,
                languages: None,
                source_filename: format!("{name}.pdf"),
            }),
        })
    }

    fn unprocessable(filename: &str) -> RankedCandidate {
        RankedCandidate::from_score(ScoreRecord::unprocessable(ExtractionFailure {
            error: "no extractable text".to_string(),
            source_filename: filename.to_string(),
        }))
    }

    fn drafting_extractor() -> StructuredExtractor {
        StructuredExtractor::new(Arc::new(KeyedProvider::new(vec![
            ("invitation email", "Dear candidate, let's talk.".to_string()),
            ("rejection email", "Thank you for applying.".to_string()),
        ])))
    }

    #[tokio::test]
    async fn test_partition_completeness() {
        let ranked = vec![eligible("A", 90), eligible("B", 70), eligible("C", 50)];
        let batch = draft_emails(&drafting_extractor(), &ranked, &job(), 2, 2)
            .await
            .unwrap();

        assert_eq!(batch.invitations.len(), 2);
        assert_eq!(batch.rejections.len(), 1);
        assert_eq!(batch.invitations[0].name, "A");
        assert_eq!(batch.invitations[1].name, "B");
        assert_eq!(batch.rejections[0].name, "C");
    }

    #[tokio::test]
    async fn test_unprocessable_candidates_receive_no_email() {
        let ranked = vec![eligible("A", 90), unprocessable("scan.pdf")];
        let batch = draft_emails(&drafting_extractor(), &ranked, &job(), 1, 2)
            .await
            .unwrap();

        assert_eq!(batch.invitations.len(), 1);
        assert!(batch.rejections.is_empty());
    }

    #[tokio::test]
    async fn test_over_requested_top_x_drafts_only_available_candidates() {
        // top_x larger than the batch: everyone eligible is invited.
        let ranked = vec![eligible("A", 80)];
        let batch = draft_emails(&drafting_extractor(), &ranked, &job(), 3, 2)
            .await
            .unwrap();

        assert_eq!(batch.invitations.len(), 1);
        assert!(batch.rejections.is_empty());
    }

    #[tokio::test]
    async fn test_failed_model_call_puts_error_in_the_body() {
        let extractor = StructuredExtractor::new(Arc::new(FailingProvider));
        let ranked = vec![eligible("A", 80)];
        let batch = draft_emails(&extractor, &ranked, &job(), 1, 1).await.unwrap();

        assert_eq!(batch.invitations.len(), 1);
        assert!(batch.invitations[0]
            .email_body
            .starts_with("Error generating email:"));
    }

    #[tokio::test]
    async fn test_empty_ranked_sequence_yields_empty_batch() {
        let batch = draft_emails(&drafting_extractor(), &[], &job(), 1, 1)
            .await
            .unwrap();
        assert!(batch.invitations.is_empty());
        assert!(batch.rejections.is_empty());
    }
}
