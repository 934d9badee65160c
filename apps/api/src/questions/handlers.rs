use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::question::{NewQuestion, Question};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreatedQuestion {
    pub id: String,
}

/// GET /api/questions
pub async fn handle_list_questions(
    State(state): State<AppState>,
) -> Result<Json<Vec<Question>>, AppError> {
    let questions = state.questions.list().await?;
    Ok(Json(questions))
}

/// POST /api/questions
pub async fn handle_create_question(
    State(state): State<AppState>,
    Json(question): Json<NewQuestion>,
) -> Result<(StatusCode, Json<CreatedQuestion>), AppError> {
    question.validate().map_err(AppError::Validation)?;

    let id = state.questions.create(&question).await?;
    info!("Created question {id} ('{}')", question.title);

    Ok((StatusCode::CREATED, Json(CreatedQuestion { id })))
}

/// DELETE /api/questions/:id
pub async fn handle_delete_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if id.trim().is_empty() {
        return Err(AppError::Validation("question id cannot be empty".to_string()));
    }

    state.questions.delete(&id).await.map_err(|e| {
        if e.is_not_found() {
            AppError::NotFound(format!("question {id}"))
        } else {
            AppError::Upstream(e)
        }
    })?;
    info!("Deleted question {id}");

    Ok(StatusCode::NO_CONTENT)
}
