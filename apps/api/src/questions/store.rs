//! Question store client — create/list/delete against the managed backend's
//! HTTP function API. This service keeps no question data of its own.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

use crate::models::question::{NewQuestion, Question};

const LIST_QUESTIONS: &str = "questions:getQuestions";
const ADD_QUESTION: &str = "questions:addQuestion";
const DELETE_QUESTION: &str = "questions:deleteQuestion";

#[derive(Debug, Error)]
pub enum QuestionStoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("backend function failed: {0}")]
    Function(String),

    #[error("unexpected backend response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl QuestionStoreError {
    /// The backend reports a missing document id as a function error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, QuestionStoreError::Function(msg) if msg.contains("nonexistent document"))
    }
}

#[async_trait]
pub trait QuestionStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Question>, QuestionStoreError>;

    /// Returns the new question's id.
    async fn create(&self, question: &NewQuestion) -> Result<String, QuestionStoreError>;

    async fn delete(&self, id: &str) -> Result<(), QuestionStoreError>;
}

#[derive(Debug, Serialize)]
struct FunctionCall<'a> {
    path: &'a str,
    args: Value,
    format: &'a str,
}

/// `{status: "success", value}` or `{status: "error", errorMessage}`.
#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
enum FunctionResult {
    Success {
        #[serde(default)]
        value: Value,
    },
    Error {
        #[serde(rename = "errorMessage")]
        error_message: String,
    },
}

impl FunctionResult {
    fn into_value(self) -> Result<Value, QuestionStoreError> {
        match self {
            FunctionResult::Success { value } => Ok(value),
            FunctionResult::Error { error_message } => {
                Err(QuestionStoreError::Function(error_message))
            }
        }
    }
}

/// Client for a Convex deployment exposing the `questions` functions.
#[derive(Clone)]
pub struct ConvexQuestionStore {
    client: Client,
    base_url: String,
}

impl ConvexQuestionStore {
    pub fn new(base_url: String) -> Result<Self, QuestionStoreError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn call(&self, kind: &str, path: &str, args: Value) -> Result<Value, QuestionStoreError> {
        let url = format!("{}/api/{}", self.base_url, kind);
        let body = FunctionCall {
            path,
            args,
            format: "json",
        };

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        debug!("{kind} {path} → {status}");
        classify_response(status, text)
    }
}

/// Function errors arrive as a non-2xx status with a JSON envelope; any
/// other non-2xx body is reported verbatim.
fn classify_response(status: StatusCode, body: String) -> Result<Value, QuestionStoreError> {
    match serde_json::from_str::<FunctionResult>(&body) {
        Ok(result) => result.into_value(),
        Err(_) if !status.is_success() => Err(QuestionStoreError::Status {
            status: status.as_u16(),
            message: body,
        }),
        Err(e) => Err(QuestionStoreError::Decode(e)),
    }
}

#[async_trait]
impl QuestionStore for ConvexQuestionStore {
    async fn list(&self) -> Result<Vec<Question>, QuestionStoreError> {
        let value = self.call("query", LIST_QUESTIONS, json!({})).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn create(&self, question: &NewQuestion) -> Result<String, QuestionStoreError> {
        let value = self
            .call("mutation", ADD_QUESTION, serde_json::to_value(question)?)
            .await?;
        value
            .as_str()
            .map(String::from)
            .ok_or_else(|| QuestionStoreError::Function(format!("expected an id, got {value}")))
    }

    async fn delete(&self, id: &str) -> Result<(), QuestionStoreError> {
        self.call("mutation", DELETE_QUESTION, json!({ "questionId": id }))
            .await?;
        Ok(())
    }
}
