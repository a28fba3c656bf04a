//! Candidate records and the per-file failure variant.
//!
//! A batch of N uploaded files always yields N `ParsedResume` values.
//! Failure is represented in-band as data, never as a raised fault that
//! aborts sibling files.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::extraction::schema::{FieldKind, FieldSpec, Schema};

/// One uploaded resume file. The filename is a display/audit label only —
/// it is never parsed for semantics.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Structured candidate record extracted from one resume file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub name: String,
    pub work_experiences: Vec<String>,
    pub location: String,
    pub skills: Vec<String>,
    pub education: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub certifications: Option<Vec<String>>,
    #[serde(default)]
    pub languages: Option<Vec<String>>,
    /// Filled in by the resume parser after decode — the model never sees it.
    #[serde(default)]
    pub source_filename: String,
}

/// First-class per-file failure record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionFailure {
    pub error: String,
    pub source_filename: String,
}

/// Outcome of parsing one file. Untagged so the wire shape matches the
/// record itself: a candidate object, or an `{error, source_filename}` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParsedResume {
    Candidate(CandidateRecord),
    Failed(ExtractionFailure),
}

impl ParsedResume {
    pub fn is_failed(&self) -> bool {
        matches!(self, ParsedResume::Failed(_))
    }

    pub fn source_filename(&self) -> &str {
        match self {
            ParsedResume::Candidate(c) => &c.source_filename,
            ParsedResume::Failed(f) => &f.source_filename,
        }
    }
}

pub const RESUME_SCHEMA: Schema = Schema {
    name: "Resume",
    fields: &[
        FieldSpec {
            name: "name",
            kind: FieldKind::Text,
            required: true,
        },
        FieldSpec {
            name: "work_experiences",
            kind: FieldKind::TextList,
            required: true,
        },
        FieldSpec {
            name: "location",
            kind: FieldKind::Text,
            required: true,
        },
        FieldSpec {
            name: "skills",
            kind: FieldKind::TextList,
            required: true,
        },
        FieldSpec {
            name: "education",
            kind: FieldKind::TextList,
            required: true,
        },
        FieldSpec {
            name: "summary",
            kind: FieldKind::Text,
            required: false,
        },
        FieldSpec {
            name: "certifications",
            kind: FieldKind::TextList,
            required: false,
        },
        FieldSpec {
            name: "languages",
            kind: FieldKind::TextList,
            required: false,
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsed_resume_untagged_decodes_candidate() {
        let json = r#"{
            "name": "Ada Lovelace",
            "work_experiences": ["Analyst Engine programmer"],
            "location": "London",
            "skills": ["mathematics"],
            "education": ["self-taught"]
        }"#;
        let parsed: ParsedResume = serde_json::from_str(json).unwrap();
        assert!(!parsed.is_failed());
    }

    #[test]
    fn test_parsed_resume_untagged_decodes_failure() {
        let json = r#"{"error": "no extractable text", "source_filename": "scan.pdf"}"#;
        let parsed: ParsedResume = serde_json::from_str(json).unwrap();
        assert!(parsed.is_failed());
        assert_eq!(parsed.source_filename(), "scan.pdf");
    }

    #[test]
    fn test_candidate_optionals_default_to_none() {
        let json = r#"{
            "name": "Ada",
            "work_experiences": [],
            "location": "London",
            "skills": [],
            "education": []
        }"#;
        let candidate: CandidateRecord = serde_json::from_str(json).unwrap();
        assert!(candidate.summary.is_none());
        assert!(candidate.certifications.is_none());
        assert_eq!(candidate.source_filename, "");
    }
}
