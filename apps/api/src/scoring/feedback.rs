//! Feedback Generator — strengths, weaknesses, and recommendations for a
//! resume against a job description.
//!
//! Retries only on the AI API's overloaded signal (fixed 1.5s backoff, 5 retries).
//! Any other failure, or a reply with no recoverable JSON object, yields
//! `Feedback::unavailable()`.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ai_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::ai_client::{AiError, GenerativeAi};
use crate::retry::{retry_if, RetryPolicy};
use crate::scoring::entities::string_list;
use crate::scoring::json_repair::extract_json;
use crate::scoring::prompts::{fill_template, FEEDBACK_PROMPT_TEMPLATE};

pub const FEEDBACK_RETRY_POLICY: RetryPolicy =
    RetryPolicy::fixed(5, Duration::from_millis(1500));

pub const UNAVAILABLE_MESSAGE: &str =
    "AI feedback is temporarily unavailable. Please try again in a few minutes.";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
}

impl Feedback {
    /// Placeholder used when no usable feedback could be obtained.
    pub fn unavailable() -> Self {
        Feedback {
            strengths: vec![UNAVAILABLE_MESSAGE.to_string()],
            weaknesses: vec![],
            recommendations: vec![],
        }
    }
}

pub fn build_feedback_prompt(resume_text: &str, job_description: &str) -> String {
    fill_template(
        FEEDBACK_PROMPT_TEMPLATE,
        &[
            ("resume_text", resume_text),
            ("job_description", job_description),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    )
}

pub async fn generate_feedback(
    ai: &dyn GenerativeAi,
    resume_text: &str,
    job_description: &str,
) -> Feedback {
    let prompt = build_feedback_prompt(resume_text, job_description);
    let prompt = prompt.as_str();

    let reply = retry_if(FEEDBACK_RETRY_POLICY, AiError::is_overloaded, move || {
        ai.generate_content(prompt)
    })
    .await;

    let text = match reply {
        Ok(text) => text,
        Err(e) => {
            warn!("Feedback generation failed: {e}; using placeholder feedback");
            return Feedback::unavailable();
        }
    };

    match parse_feedback(&text) {
        Some(feedback) => {
            info!(
                "Feedback: {} strengths, {} weaknesses, {} recommendations",
                feedback.strengths.len(),
                feedback.weaknesses.len(),
                feedback.recommendations.len()
            );
            feedback
        }
        None => {
            warn!("Feedback reply had no recoverable JSON; using placeholder feedback");
            Feedback::unavailable()
        }
    }
}

/// Runs the tolerant extractor; missing keys become empty lists.
pub fn parse_feedback(reply: &str) -> Option<Feedback> {
    let value = extract_json(reply)?;
    Some(Feedback {
        strengths: string_list(&value, "strengths"),
        weaknesses: string_list(&value, "weaknesses"),
        recommendations: string_list(&value, "recommendations"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::testing::{bad_request, overloaded, ScriptedAi};

    const GOOD_REPLY: &str = "```json\n{\"strengths\": [\"Rust\", \"Testing\"], \"weaknesses\": [\"No cloud\"], \"recommendations\": [\"Add AWS\",]}\n```";

    #[test]
    fn test_parse_tolerates_fence_and_trailing_comma() {
        let feedback = parse_feedback(GOOD_REPLY).unwrap();
        assert_eq!(feedback.strengths, vec!["Rust", "Testing"]);
        assert_eq!(feedback.weaknesses, vec!["No cloud"]);
        assert_eq!(feedback.recommendations, vec!["Add AWS"]);
    }

    #[test]
    fn test_parse_missing_keys_are_empty() {
        let feedback = parse_feedback(r#"{"strengths": ["Rust"]}"#).unwrap();
        assert_eq!(feedback.strengths, vec!["Rust"]);
        assert!(feedback.weaknesses.is_empty());
        assert!(feedback.recommendations.is_empty());
    }

    #[test]
    fn test_parse_garbage_is_none() {
        assert!(parse_feedback("I cannot help with that.").is_none());
    }

    #[test]
    fn test_unavailable_shape() {
        let feedback = Feedback::unavailable();
        assert_eq!(feedback.strengths.len(), 1);
        assert!(feedback.weaknesses.is_empty());
        assert!(feedback.recommendations.is_empty());
    }

    #[test]
    fn test_prompt_embeds_both_texts() {
        let prompt = build_feedback_prompt("my resume", "the job");
        assert!(prompt.contains("my resume"));
        assert!(prompt.contains("the job"));
        assert!(prompt.contains("\"recommendations\""));
        assert!(prompt.contains("code fences"));
    }

    #[test]
    fn test_resume_is_embedded_once_when_job_mentions_placeholder() {
        let prompt = build_feedback_prompt("SECRET RESUME", "Role needs {resume_text} skills");
        assert_eq!(prompt.matches("SECRET RESUME").count(), 1);
        assert!(prompt.contains("Role needs {resume_text} skills"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_six_overloaded_attempts_yield_placeholder() {
        let ai = ScriptedAi::new().always_overloaded();
        let feedback = generate_feedback(&ai, "resume", "job").await;
        assert_eq!(feedback, Feedback::unavailable());
        assert_eq!(ai.generate_calls(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_after_transient_overload() {
        let ai = ScriptedAi::new()
            .with_reply(Err(overloaded()))
            .with_reply(Err(overloaded()))
            .with_text(GOOD_REPLY);
        let feedback = generate_feedback(&ai, "resume", "job").await;
        assert_eq!(feedback.strengths, vec!["Rust", "Testing"]);
        assert_eq!(ai.generate_calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_other_error_does_not_retry() {
        let ai = ScriptedAi::new().with_reply(Err(bad_request()));
        let feedback = generate_feedback(&ai, "resume", "job").await;
        assert_eq!(feedback, Feedback::unavailable());
        assert_eq!(ai.generate_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unparseable_reply_is_not_retried() {
        let ai = ScriptedAi::new()
            .with_text("Sorry, no JSON today")
            .with_text(GOOD_REPLY);
        let feedback = generate_feedback(&ai, "resume", "job").await;
        assert_eq!(feedback, Feedback::unavailable());
        assert_eq!(ai.generate_calls(), 1);
    }
}
