// Shared prompt fragments. Each pipeline stage keeps its own prompts
// alongside it in `scoring::prompts`; this file holds the cross-cutting ones.

/// Instruction appended to every prompt that expects a JSON reply.
pub const JSON_ONLY_INSTRUCTION: &str = "Respond ONLY with a single valid JSON object. \
    Do NOT wrap it in markdown code fences. \
    Do NOT include any explanation or text outside the JSON object.";
