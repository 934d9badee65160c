/// AI Client — the single point of entry for all generative-AI API calls.
///
/// No other module may call the Gemini API directly. Pipeline stages depend on
/// the `GenerativeAi` trait so tests can substitute a scripted fake.
///
/// The client makes exactly one attempt per call. Retry policy belongs to the
/// caller (see `crate::retry`).
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

/// Model used for all text generation.
pub const GENERATION_MODEL: &str = "gemini-2.5-flash";
/// Model used for all embeddings.
pub const EMBEDDING_MODEL: &str = "text-embedding-004";

const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api {
        status: u16,
        /// The API's own status string, e.g. `UNAVAILABLE`.
        code: Option<String>,
        message: String,
    },

    #[error("AI API returned empty content")]
    EmptyContent,
}

impl AiError {
    /// The transient "service overloaded" signal. This is the only error
    /// callers retry on.
    pub fn is_overloaded(&self) -> bool {
        match self {
            AiError::Api { status, code, .. } => {
                *status == 503 || code.as_deref() == Some("UNAVAILABLE")
            }
            _ => false,
        }
    }
}

/// Embedding task hint sent with `embedContent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    SemanticSimilarity,
}

/// The two generative-AI operations the service consumes.
#[async_trait]
pub trait GenerativeAi: Send + Sync {
    /// Sends one prompt and returns the model's text reply.
    async fn generate_content(&self, prompt: &str) -> Result<String, AiError>;

    /// Embeds `text` and returns the first vector of the response.
    async fn embed_content(&self, text: &str, task_type: TaskType) -> Result<Vec<f32>, AiError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedRequest<'a> {
    model: String,
    content: Content<'a>,
    task_type: TaskType,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

impl GenerateResponse {
    /// Concatenates the text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EmbedResponse {
    pub embedding: Option<ContentEmbedding>,
    #[serde(default)]
    pub embeddings: Vec<ContentEmbedding>,
}

#[derive(Debug, Deserialize)]
pub struct ContentEmbedding {
    #[serde(default)]
    pub values: Vec<f32>,
}

impl EmbedResponse {
    /// The first vector in the response, whichever shape the API used.
    pub fn into_first_vector(self) -> Option<Vec<f32>> {
        self.embedding
            .or_else(|| self.embeddings.into_iter().next())
            .map(|e| e.values)
            .filter(|v| !v.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
    status: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini client
// ────────────────────────────────────────────────────────────────────────────

/// Gemini REST client. Constructed once at startup and shared via `AppState`.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: String) -> Result<Self, AiError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn model_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, model, method)
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<reqwest::Response, AiError> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!("AI API returned {}: {}", status, body);
        Err(api_error(status.as_u16(), body))
    }
}

/// Builds an `AiError::Api`, preferring the API's structured error message.
fn api_error(status: u16, body: String) -> AiError {
    match serde_json::from_str::<ApiErrorEnvelope>(&body) {
        Ok(envelope) => AiError::Api {
            status,
            code: envelope.error.status,
            message: envelope.error.message,
        },
        Err(_) => AiError::Api {
            status,
            code: None,
            message: body,
        },
    }
}

#[async_trait]
impl GenerativeAi for GeminiClient {
    async fn generate_content(&self, prompt: &str) -> Result<String, AiError> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let url = self.model_url(GENERATION_MODEL, "generateContent");
        let response: GenerateResponse = self.post(&url, &request).await?.json().await?;
        let text = response.text().ok_or(AiError::EmptyContent)?;

        debug!("generateContent succeeded: {} chars", text.len());
        Ok(text)
    }

    async fn embed_content(&self, text: &str, task_type: TaskType) -> Result<Vec<f32>, AiError> {
        let request = EmbedRequest {
            model: format!("models/{EMBEDDING_MODEL}"),
            content: Content {
                parts: vec![Part { text }],
            },
            task_type,
        };

        let url = self.model_url(EMBEDDING_MODEL, "embedContent");
        let response: EmbedResponse = self.post(&url, &request).await?.json().await?;
        let vector = response.into_first_vector().ok_or(AiError::EmptyContent)?;

        debug!("embedContent succeeded: {} dims", vector.len());
        Ok(vector)
    }
}
