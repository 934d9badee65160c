//! Axum route handler for the resume-scoring API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use tracing::warn;

use crate::errors::AppError;
use crate::scoring::{score_resume, ExperienceLevel, ScoreRequest, ScoreResult};
use crate::state::AppState;

/// POST /api/score-resume
///
/// Multipart fields: `resume` (file), `jobDescription`, `category`, `experience`.
/// Returns `{ score, strengths, weaknesses, recommendations }`.
pub async fn handle_score_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ScoreResult>, AppError> {
    let request = read_score_form(multipart, state.config.max_upload_bytes).await?;
    let result = score_resume(state.ai.as_ref(), request).await?;
    Ok(Json(result))
}

/// Collects the form fields into a `ScoreRequest`.
/// Missing text fields are empty strings; a missing file is a validation error.
async fn read_score_form(
    mut multipart: Multipart,
    max_upload_bytes: usize,
) -> Result<ScoreRequest, AppError> {
    let mut resume: Option<(String, Bytes)> = None;
    let mut job_description = String::new();
    let mut category = String::new();
    let mut experience = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "resume" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field.bytes().await.map_err(multipart_error)?;
                if data.len() > max_upload_bytes {
                    return Err(AppError::PayloadTooLarge(format!(
                        "resume is {} bytes; the limit is {max_upload_bytes} bytes",
                        data.len()
                    )));
                }
                resume = Some((filename, data));
            }
            "jobDescription" => job_description = field.text().await.map_err(multipart_error)?,
            "category" => category = field.text().await.map_err(multipart_error)?,
            "experience" => {
                let raw = field.text().await.map_err(multipart_error)?;
                experience = match raw.parse::<ExperienceLevel>() {
                    Ok(level) => Some(level),
                    Err(e) => {
                        warn!("Ignoring experience field: {e}");
                        None
                    }
                };
            }
            other => {
                warn!("Ignoring unexpected form field '{other}'");
                field.bytes().await.map_err(multipart_error)?;
            }
        }
    }

    let (filename, resume) =
        resume.ok_or_else(|| AppError::Validation("resume file is required".to_string()))?;

    Ok(ScoreRequest {
        filename,
        resume,
        job_description,
        category,
        experience,
    })
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(format!("invalid multipart body: {}", e.body_text()))
    }
}
