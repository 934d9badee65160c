//! Entity Extractor — job titles, organizations, and degrees from resume text.
//!
//! Best-effort: the reply is parsed as strict JSON (no fence stripping) and any
//! failure yields empty lists. Never aborts the pipeline.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::ai_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::ai_client::GenerativeAi;
use crate::scoring::prompts::{fill_template, ENTITY_PROMPT_TEMPLATE};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntityExtraction {
    pub roles: Vec<String>,
    pub organizations: Vec<String>,
    pub degrees: Vec<String>,
}

pub fn build_entity_prompt(resume_text: &str) -> String {
    fill_template(
        ENTITY_PROMPT_TEMPLATE,
        &[("resume_text", resume_text), ("json_only", JSON_ONLY_INSTRUCTION)],
    )
}

pub async fn extract_entities(ai: &dyn GenerativeAi, resume_text: &str) -> EntityExtraction {
    let prompt = build_entity_prompt(resume_text);

    let reply = match ai.generate_content(&prompt).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Entity extraction request failed: {e}");
            return EntityExtraction::default();
        }
    };

    let entities = parse_entities(&reply);
    debug!(
        "Extracted {} roles, {} orgs, {} degrees",
        entities.roles.len(),
        entities.organizations.len(),
        entities.degrees.len()
    );
    entities
}

/// Parses the raw reply strictly. A parse failure empties all three lists;
/// a missing or non-array key empties only that list.
pub fn parse_entities(reply: &str) -> EntityExtraction {
    let value: Value = match serde_json::from_str(reply) {
        Ok(v) => v,
        Err(e) => {
            warn!("Entity extraction reply was not valid JSON: {e}");
            return EntityExtraction::default();
        }
    };

    EntityExtraction {
        roles: string_list(&value, "roles"),
        organizations: string_list(&value, "orgs"),
        degrees: string_list(&value, "degrees"),
    }
}

/// Collects the string items of `value[key]`; non-string items are skipped.
pub fn string_list(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|item| item.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}
