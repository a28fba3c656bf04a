//! Score, ranking, and email draft records.

use serde::{Deserialize, Serialize};

use crate::extraction::schema::{FieldKind, FieldSpec, Schema};
use crate::models::candidate::{ExtractionFailure, ParsedResume};

/// Wire record returned by the scoring model call. All four dimensions are
/// bounded to [0, 100] by the schema before this struct ever exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    pub name: String,
    pub relevance: u8,
    pub experience: u8,
    pub skills: u8,
    pub overall: u8,
    pub comment: String,
}

/// One score per input file, carrying the record it was computed from.
/// Failed files get an all-zero score with the error surfaced as `comment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub relevance: u8,
    pub experience: u8,
    pub skills: u8,
    pub overall: u8,
    pub comment: String,
    pub resume: ParsedResume,
}

impl ScoreRecord {
    pub fn from_parts(score: CandidateScore, resume: ParsedResume) -> Self {
        Self {
            name: score.name,
            relevance: score.relevance,
            experience: score.experience,
            skills: score.skills,
            overall: score.overall,
            comment: score.comment,
            resume,
        }
    }

    /// Zero-score placeholder for a candidate whose resume could not be
    /// parsed. No usable contact identity — the emailer skips these.
    pub fn unprocessable(failure: ExtractionFailure) -> Self {
        Self {
            name: format!("Unprocessable ({})", failure.source_filename),
            relevance: 0,
            experience: 0,
            skills: 0,
            overall: 0,
            comment: failure.error.clone(),
            resume: ParsedResume::Failed(failure),
        }
    }

    /// Zero-score record for a parsed candidate whose scoring call failed.
    /// The candidate identity is kept so they still receive an email.
    pub fn scoring_failed(name: String, error: String, resume: ParsedResume) -> Self {
        Self {
            name,
            relevance: 0,
            experience: 0,
            skills: 0,
            overall: 0,
            comment: error,
            resume,
        }
    }
}

/// A score record plus its derived fitness key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    #[serde(flatten)]
    pub score: ScoreRecord,
    /// Mean of the four sub-scores. This is the fitness key used for
    /// ordering (see DESIGN.md).
    pub avg_score: f64,
}

impl RankedCandidate {
    pub fn from_score(score: ScoreRecord) -> Self {
        let avg_score = (score.relevance as u16
            + score.experience as u16
            + score.skills as u16
            + score.overall as u16) as f64
            / 4.0;
        Self { score, avg_score }
    }
}

/// One drafted email, keyed by candidate name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailDraft {
    pub name: String,
    pub email_body: String,
}

/// Drafts partitioned by intent, each in rank order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailBatch {
    pub invitations: Vec<EmailDraft>,
    pub rejections: Vec<EmailDraft>,
}

pub const SCORE_SCHEMA: Schema = Schema {
    name: "CandidateScore",
    fields: &[
        FieldSpec {
            name: "name",
            kind: FieldKind::Text,
            required: true,
        },
        FieldSpec {
            name: "relevance",
            kind: FieldKind::BoundedInt { min: 0, max: 100 },
            required: true,
        },
        FieldSpec {
            name: "experience",
            kind: FieldKind::BoundedInt { min: 0, max: 100 },
            required: true,
        },
        FieldSpec {
            name: "skills",
            kind: FieldKind::BoundedInt { min: 0, max: 100 },
            required: true,
        },
        FieldSpec {
            name: "overall",
            kind: FieldKind::BoundedInt { min: 0, max: 100 },
            required: true,
        },
        FieldSpec {
            name: "comment",
            kind: FieldKind::Text,
            required: true,
        },
    ],
};
