//! Resume parser — batch of files in, one outcome per file out.
//!
//! The critical isolation invariant of the whole pipeline lives here: a
//! batch of N files always yields N outcomes, in input order, and failure
//! of one file never aborts processing of the remaining files.

use anyhow::Result;
use tracing::warn;

use crate::extraction::StructuredExtractor;
use crate::models::candidate::{
    CandidateRecord, ExtractionFailure, ParsedResume, ResumeFile, RESUME_SCHEMA,
};
use crate::screening::document;
use crate::screening::gather::gather_settled;
use crate::screening::prompts::{RESUME_PARSE_PROMPT_TEMPLATE, RESUME_PARSE_SYSTEM};

/// Parses every file independently under bounded concurrency. Returns
/// exactly `files.len()` outcomes, reassembled in input order. Even a
/// worker panic (pdf-extract aborts on some malformed documents) is
/// recorded as that file's failure, not the batch's.
pub async fn parse_resumes(
    extractor: &StructuredExtractor,
    files: Vec<ResumeFile>,
    max_concurrent: usize,
) -> Result<Vec<ParsedResume>> {
    let filenames: Vec<String> = files.iter().map(|f| f.filename.clone()).collect();
    let tasks: Vec<_> = files
        .into_iter()
        .map(|file| {
            let extractor = extractor.clone();
            async move { parse_one(&extractor, file).await }
        })
        .collect();

    let settled = gather_settled(tasks, max_concurrent).await;
    Ok(settled
        .into_iter()
        .zip(filenames)
        .map(|(outcome, filename)| match outcome {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("resume {filename} worker crashed: {e}");
                failed(filename, format!("resume processing crashed: {e}"))
            }
        })
        .collect())
}

async fn parse_one(extractor: &StructuredExtractor, file: ResumeFile) -> ParsedResume {
    let text = match document::extract_text(&file.bytes, &file.content_type) {
        Ok(text) => text,
        Err(e) => {
            warn!("resume {} rejected: {e}", file.filename);
            return failed(file.filename, e.to_string());
        }
    };

    // Scanned/image-only PDFs are unsupported and diagnosed here, not
    // silently scored as empty.
    if text.trim().is_empty() {
        warn!("resume {} has no extractable text", file.filename);
        return failed(
            file.filename,
            "no extractable text (scanned or image-only document)".to_string(),
        );
    }

    let prompt = RESUME_PARSE_PROMPT_TEMPLATE.replace("{resume_text}", &text);
    match extractor
        .extract::<CandidateRecord>(&prompt, RESUME_PARSE_SYSTEM, &RESUME_SCHEMA)
        .await
    {
        Ok(mut candidate) => {
            candidate.source_filename = file.filename;
            ParsedResume::Candidate(candidate)
        }
        Err(e) => {
            warn!("resume {} extraction failed: {e}", file.filename);
            failed(file.filename, format!("resume extraction failed: {e}"))
        }
    }
}

fn failed(source_filename: String, error: String) -> ParsedResume {
    ParsedResume::Failed(ExtractionFailure {
        error,
        source_filename,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::test_support::{
        FailingProvider, KeyedProvider, PanickingProvider, StaticProvider,
    };
    use bytes::Bytes;
    use std::sync::Arc;

    fn text_file(name: &str, body: &str) -> ResumeFile {
        ResumeFile {
            filename: name.to_string(),
            content_type: "text/plain".to_string(),
            bytes: Bytes::from(body.to_string()),
        }
    }

    const CANDIDATE_JSON: &str = r#"{
        "name": "Alice Johnson",
        "work_experiences": ["Backend engineer, 6 years"],
        "location": "Berlin",
        "skills": ["Go", "distributed systems"],
        "education": ["BSc Computer Science"]
    }"#;

    #[tokio::test]
    async fn test_empty_file_becomes_failure_without_model_call() {
        let provider = Arc::new(KeyedProvider::new(vec![]));
        let extractor = StructuredExtractor::new(provider.clone());

        let results = parse_resumes(&extractor, vec![text_file("blank.pdf", "   ")], 2)
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        match &results[0] {
            ParsedResume::Failed(f) => {
                assert!(f.error.contains("no extractable text"));
                assert_eq!(f.source_filename, "blank.pdf");
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_one_bad_file_never_aborts_its_siblings() {
        // Provider fails every call; both files still get an outcome.
        let extractor = StructuredExtractor::new(Arc::new(FailingProvider));

        let files = vec![
            text_file("a.txt", "Alice resume text"),
            text_file("b.txt", "Bob resume text"),
        ];
        let results = parse_resumes(&extractor, files, 2).await.unwrap();

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(ParsedResume::is_failed));
        assert_eq!(results[0].source_filename(), "a.txt");
        assert_eq!(results[1].source_filename(), "b.txt");
    }

    #[tokio::test]
    async fn test_crashed_worker_becomes_that_files_failure() {
        // One worker panics mid-parse; the siblings still settle normally.
        let extractor = StructuredExtractor::new(Arc::new(PanickingProvider {
            needle: "Bob resume",
            response: CANDIDATE_JSON.to_string(),
        }));

        let files = vec![
            text_file("alice.txt", "Alice resume text"),
            text_file("bob.txt", "Bob resume text"),
            text_file("carol.txt", "Carol resume text"),
        ];
        let results = parse_resumes(&extractor, files, 3).await.unwrap();

        assert_eq!(results.len(), 3);
        assert!(!results[0].is_failed());
        match &results[1] {
            ParsedResume::Failed(f) => {
                assert_eq!(f.source_filename, "bob.txt");
                assert!(f.error.contains("crashed"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(!results[2].is_failed());
    }

    #[tokio::test]
    async fn test_parsed_candidate_carries_source_filename() {
        let extractor =
            StructuredExtractor::new(Arc::new(StaticProvider(CANDIDATE_JSON.to_string())));

        let results = parse_resumes(&extractor, vec![text_file("alice.txt", "Alice...")], 1)
            .await
            .unwrap();

        match &results[0] {
            ParsedResume::Candidate(c) => {
                assert_eq!(c.name, "Alice Johnson");
                assert_eq!(c.source_filename, "alice.txt");
            }
            other => panic!("expected candidate, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_batch_order_is_preserved() {
        let extractor =
            StructuredExtractor::new(Arc::new(StaticProvider(CANDIDATE_JSON.to_string())));

        let files = vec![
            text_file("0.txt", "resume zero"),
            text_file("1.txt", "   "),
            text_file("2.txt", "resume two"),
        ];
        let results = parse_resumes(&extractor, files, 3).await.unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].source_filename(), "0.txt");
        assert_eq!(results[1].source_filename(), "1.txt");
        assert!(results[1].is_failed());
        assert_eq!(results[2].source_filename(), "2.txt");
    }
}
