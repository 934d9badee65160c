//! Scripted `GenerativeAi` fake shared by the pipeline tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::ai_client::{AiError, GenerativeAi, TaskType};

pub fn overloaded() -> AiError {
    AiError::Api {
        status: 503,
        code: Some("UNAVAILABLE".to_string()),
        message: "The model is overloaded. Please try again later.".to_string(),
    }
}

pub fn bad_request() -> AiError {
    AiError::Api {
        status: 400,
        code: Some("INVALID_ARGUMENT".to_string()),
        message: "API key not valid".to_string(),
    }
}

/// Replays queued embeddings and generation replies in call order.
/// An empty embedding queue fails with `EmptyContent`; an empty reply queue
/// fails with `bad_request()` unless `always_overloaded` is set.
#[derive(Default)]
pub struct ScriptedAi {
    embeddings: Mutex<VecDeque<Vec<f32>>>,
    replies: Mutex<VecDeque<Result<String, AiError>>>,
    always_overloaded: bool,
    prompts: Mutex<Vec<String>>,
    embed_calls: AtomicUsize,
    generate_calls: AtomicUsize,
}

impl ScriptedAi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_embeddings(self, vectors: Vec<Vec<f32>>) -> Self {
        self.embeddings.lock().unwrap().extend(vectors);
        self
    }

    pub fn with_reply(self, reply: Result<String, AiError>) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.with_reply(Ok(text.to_string()))
    }

    pub fn always_overloaded(mut self) -> Self {
        self.always_overloaded = true;
        self
    }

    pub fn embed_calls(&self) -> usize {
        self.embed_calls.load(Ordering::SeqCst)
    }

    pub fn generate_calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeAi for ScriptedAi {
    async fn generate_content(&self, prompt: &str) -> Result<String, AiError> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.replies.lock().unwrap().pop_front() {
            Some(reply) => reply,
            None if self.always_overloaded => Err(overloaded()),
            None => Err(bad_request()),
        }
    }

    async fn embed_content(&self, _text: &str, _task_type: TaskType) -> Result<Vec<f32>, AiError> {
        self.embed_calls.fetch_add(1, Ordering::SeqCst);
        self.embeddings
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(AiError::EmptyContent)
    }
}
