//! Ranker — pure, deterministic ordering of scored candidates.
//!
//! The fitness key is `avg_score`, the mean of the four sub-scores (see
//! DESIGN.md for the rationale). The sort is stable: records with equal
//! keys keep their original batch order.

use std::cmp::Ordering;

use crate::models::score::{RankedCandidate, ScoreRecord};

/// Sorts score records descending by `avg_score`. Total (empty in, empty
/// out) and idempotent: re-ranking an already-ranked sequence is a no-op.
pub fn rank(scores: Vec<ScoreRecord>) -> Vec<RankedCandidate> {
    let mut ranked: Vec<RankedCandidate> =
        scores.into_iter().map(RankedCandidate::from_score).collect();

    // Vec::sort_by is stable; NaN cannot occur since avg_score is derived
    // from bounded integers, but Equal keeps the sort total regardless.
    ranked.sort_by(|a, b| {
        b.avg_score
            .partial_cmp(&a.avg_score)
            .unwrap_or(Ordering::Equal)
    });
    ranked
}
