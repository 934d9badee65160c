// Prompt templates for the resume-scoring pipeline.
// Placeholders in braces are substituted in a single pass by `fill_template`.

/// Entity extraction prompt. Replace `{resume_text}`.
pub const ENTITY_PROMPT_TEMPLATE: &str = r#"Extract structured information from the resume below.

Return a JSON object with this EXACT schema (no extra fields):
{
  "roles": ["job titles the candidate has held"],
  "orgs": ["companies, universities, and other organizations"],
  "degrees": ["academic degrees and diplomas"]
}

Use empty arrays when nothing is found.

Resume:
{resume_text}

{json_only}"#;

/// Feedback prompt. Replace `{resume_text}` and `{job_description}`.
pub const FEEDBACK_PROMPT_TEMPLATE: &str = r#"Resume:
{resume_text}

Job Description:
{job_description}

Analyze the resume for this job. List strengths, weaknesses, and recommendations for improvement.
Return a JSON object with this EXACT schema:
{
  "strengths": ["..."],
  "weaknesses": ["..."],
  "recommendations": ["..."]
}

{json_only}"#;

/// Substitutes `{name}` placeholders in one left-to-right pass.
/// Substituted text is never rescanned, so user input containing a
/// placeholder name is copied through verbatim. Unknown braces are kept.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let hit = values.iter().find(|(name, _)| {
            tail[1..]
                .strip_prefix(*name)
                .is_some_and(|after| after.starts_with('}'))
        });
        match hit {
            Some((name, value)) => {
                out.push_str(value);
                rest = &tail[name.len() + 2..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
