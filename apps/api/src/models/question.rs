use serde::{Deserialize, Serialize};

/// A worked example attached to a practice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionExample {
    pub input: String,
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// A practice question as stored by the question backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_creationTime", default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<f64>,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub examples: Vec<QuestionExample>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

/// Payload for creating a question. There is no update operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewQuestion {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub examples: Vec<QuestionExample>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Vec<String>>,
}

impl NewQuestion {
    /// Returns the first problem found, if any.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("title cannot be empty".to_string());
        }
        if self.description.trim().is_empty() {
            return Err("description cannot be empty".to_string());
        }
        if let Some(i) = self
            .examples
            .iter()
            .position(|e| e.input.trim().is_empty() || e.output.trim().is_empty())
        {
            return Err(format!("example {} needs both input and output", i + 1));
        }
        Ok(())
    }
}
