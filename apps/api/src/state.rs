use std::sync::Arc;

use crate::ai_client::GenerativeAi;
use crate::config::Config;
use crate::questions::store::QuestionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Generative-AI backend used by the scoring pipeline. `GeminiClient` in production.
    pub ai: Arc<dyn GenerativeAi>,
    /// Question bank backend. `ConvexQuestionStore` in production.
    pub questions: Arc<dyn QuestionStore>,
    pub config: Config,
}
