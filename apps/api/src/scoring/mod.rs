//! Resume Scoring — orchestrates the scoring pipeline for one upload.
//!
//! Flow: extract_text → semantic_similarity (two embeddings, concurrent) →
//!       extract_entities → generate_feedback → composite_score.
//!
//! Every stage except DOCX extraction degrades to a default instead of failing.
//! No state survives the request.

pub mod composite;
pub mod entities;
pub mod extract;
pub mod feedback;
pub mod handlers;
pub mod json_repair;
pub mod prompts;
pub mod similarity;

#[cfg(test)]
pub mod testing;

use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ai_client::GenerativeAi;
use crate::errors::AppError;
use crate::scoring::composite::{category_match, composite_score, ScoreInputs};
use crate::scoring::entities::extract_entities;
use crate::scoring::extract::extract_text;
use crate::scoring::feedback::generate_feedback;
use crate::scoring::similarity::semantic_similarity;

/// Candidate experience band selected in the upload form.
///
/// Accepted and logged; the composite score does not use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Fresher,
    Intermediate,
    Experienced,
}

impl FromStr for ExperienceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Fresher" => Ok(ExperienceLevel::Fresher),
            "Intermediate" => Ok(ExperienceLevel::Intermediate),
            "Experienced" => Ok(ExperienceLevel::Experienced),
            other => Err(format!("unknown experience level '{other}'")),
        }
    }
}

/// One scoring request, assembled from the multipart form.
#[derive(Debug, Clone)]
pub struct ScoreRequest {
    pub filename: String,
    pub resume: Bytes,
    pub job_description: String,
    pub category: String,
    pub experience: Option<ExperienceLevel>,
}

/// The sole externally visible output of the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub score: u8,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Runs the full pipeline for one request.
///
/// Only DOCX extraction failures are returned as errors; every other stage
/// substitutes its fallback value.
pub async fn score_resume(
    ai: &dyn GenerativeAi,
    request: ScoreRequest,
) -> Result<ScoreResult, AppError> {
    info!(
        "Scoring '{}' ({} bytes), category='{}', experience={:?}",
        request.filename,
        request.resume.len(),
        request.category,
        request.experience
    );

    // Step 1: Extract text
    let resume_text = extract_text(&request.filename, request.resume).await?;
    info!("Extracted {} chars of resume text", resume_text.len());

    // Step 2: Similarity (embeddings run concurrently inside)
    let similarity = semantic_similarity(ai, &resume_text, &request.job_description).await;

    // Step 3: Entities
    let entities = extract_entities(ai, &resume_text).await;

    // Step 4: Feedback (retried on overload)
    let feedback = generate_feedback(ai, &resume_text, &request.job_description).await;

    // Step 5: Composite score
    let inputs = ScoreInputs {
        similarity,
        category_match: category_match(&entities.roles, &request.category),
        degree_count: entities.degrees.len(),
        org_count: entities.organizations.len(),
        strengths_count: feedback.strengths.len(),
        weaknesses_count: feedback.weaknesses.len(),
    };
    let score = composite_score(&inputs);
    info!("Composite score {score}/100 from {inputs:?}");

    Ok(ScoreResult {
        score,
        strengths: feedback.strengths,
        weaknesses: feedback.weaknesses,
        recommendations: feedback.recommendations,
    })
}
