//! Structured job description record and its extraction schema.

use serde::{Deserialize, Serialize};

use crate::extraction::schema::{FieldKind, FieldSpec, Schema};

/// Structured job description. Produced once per run by the job description
/// parser, immutable thereafter; consumed by the scorer and the emailer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub requirements: Vec<String>,
    pub responsibilities: Vec<String>,
    pub benefits: Vec<String>,
    #[serde(default)]
    pub experience: Option<String>,
}

pub const JOB_SCHEMA: Schema = Schema {
    name: "JobDescription",
    fields: &[
        FieldSpec {
            name: "title",
            kind: FieldKind::Text,
            required: true,
        },
        FieldSpec {
            name: "company",
            kind: FieldKind::Text,
            required: false,
        },
        FieldSpec {
            name: "location",
            kind: FieldKind::Text,
            required: false,
        },
        FieldSpec {
            name: "requirements",
            kind: FieldKind::TextList,
            required: true,
        },
        FieldSpec {
            name: "responsibilities",
            kind: FieldKind::TextList,
            required: true,
        },
        FieldSpec {
            name: "benefits",
            kind: FieldKind::TextList,
            required: true,
        },
        FieldSpec {
            name: "experience",
            kind: FieldKind::Text,
            required: false,
        },
    ],
};
