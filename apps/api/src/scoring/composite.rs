//! Composite Scorer — deterministic heuristic, no I/O.
//!
//! ```text
//! raw   = similarity·50 + category_match·10 + min(degrees·5, 15)
//!       + min(orgs·2, 10) + strengths·5 − weaknesses·3
//! score = clamp(round(raw), 0, 100)
//! ```
//! `round` is `f64::round` (half away from zero).

use serde::Serialize;

const SIMILARITY_WEIGHT: f64 = 50.0;
const CATEGORY_MATCH_POINTS: f64 = 10.0;
const DEGREE_POINTS: usize = 5;
const DEGREE_CAP: usize = 15;
const ORG_POINTS: usize = 2;
const ORG_CAP: usize = 10;
const STRENGTH_POINTS: i64 = 5;
const WEAKNESS_PENALTY: i64 = 3;

pub const MIN_SCORE: u8 = 0;
pub const MAX_SCORE: u8 = 100;

/// Every input the composite score depends on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreInputs {
    /// Normalised similarity in [0, 1].
    pub similarity: f64,
    pub category_match: usize,
    pub degree_count: usize,
    pub org_count: usize,
    pub strengths_count: usize,
    pub weaknesses_count: usize,
}

/// Number of roles whose lowercase form contains the lowercase category.
/// Always 0 for an empty category.
pub fn category_match(roles: &[String], category: &str) -> usize {
    if category.is_empty() {
        return 0;
    }
    let category = category.to_lowercase();
    roles
        .iter()
        .filter(|r| r.to_lowercase().contains(&category))
        .count()
}

pub fn degree_points(degree_count: usize) -> usize {
    (degree_count * DEGREE_POINTS).min(DEGREE_CAP)
}

pub fn org_points(org_count: usize) -> usize {
    (org_count * ORG_POINTS).min(ORG_CAP)
}

/// May be negative.
pub fn feedback_points(strengths_count: usize, weaknesses_count: usize) -> i64 {
    strengths_count as i64 * STRENGTH_POINTS - weaknesses_count as i64 * WEAKNESS_PENALTY
}

pub fn raw_score(inputs: &ScoreInputs) -> f64 {
    inputs.similarity * SIMILARITY_WEIGHT
        + inputs.category_match as f64 * CATEGORY_MATCH_POINTS
        + degree_points(inputs.degree_count) as f64
        + org_points(inputs.org_count) as f64
        + feedback_points(inputs.strengths_count, inputs.weaknesses_count) as f64
}

pub fn composite_score(inputs: &ScoreInputs) -> u8 {
    raw_score(inputs)
        .round()
        .clamp(MIN_SCORE as f64, MAX_SCORE as f64) as u8
}
