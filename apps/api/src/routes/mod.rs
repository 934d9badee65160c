pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::questions::handlers as questions;
use crate::scoring::handlers as scoring;
use crate::state::AppState;

/// Room for multipart boundaries and the text fields on top of the file itself.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + FORM_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/score-resume",
            post(scoring::handle_score_resume).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route(
            "/api/questions",
            get(questions::handle_list_questions).post(questions::handle_create_question),
        )
        .route(
            "/api/questions/:id",
            delete(questions::handle_delete_question),
        )
        .with_state(state)
}
