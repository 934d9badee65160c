//! Tolerant JSON extraction for model replies.
//!
//! The reply is normalised by a fixed sequence of text passes (trim, strip
//! fences, slice to the outermost braces) and then handed to a chain of
//! parsers, each tried in order until one yields a JSON object:
//! 1. strict `serde_json` parse
//! 2. parse after removing trailing commas before `}` / `]`

use serde_json::Value;

/// A single parsing strategy in the fallback chain.
type JsonParser = fn(&str) -> Option<Value>;

const PARSER_CHAIN: &[JsonParser] = &[parse_strict, parse_without_trailing_commas];

/// Extracts a JSON object from free-form model output.
/// Returns `None` when no parser in the chain recovers an object.
pub fn extract_json(raw: &str) -> Option<Value> {
    let candidate = slice_to_braces(strip_fences(raw.trim()));
    PARSER_CHAIN
        .iter()
        .find_map(|parse| parse(candidate))
        .filter(Value::is_object)
}

/// Strips a leading ```` ```json ```` or ```` ``` ```` marker and a trailing
/// ```` ``` ```` marker, each independently.
pub fn strip_fences(text: &str) -> &str {
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    text.strip_suffix("```").unwrap_or(text).trim()
}

/// Narrows `text` to the span from the first `{` to the last `}`.
/// Returns the input unchanged when there is no such span.
pub fn slice_to_braces(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

pub fn parse_strict(text: &str) -> Option<Value> {
    serde_json::from_str(text).ok()
}

pub fn parse_without_trailing_commas(text: &str) -> Option<Value> {
    parse_strict(&remove_trailing_commas(text))
}

/// Drops any comma followed (after optional whitespace) by `}` or `]`.
/// Commas inside string literals are left alone.
pub fn remove_trailing_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            ',' => {
                let next = chars[i + 1..].iter().copied().find(|ch| !ch.is_whitespace());
                if !matches!(next, Some('}') | Some(']')) {
                    out.push(c);
                }
            }
            _ => out.push(c),
        }
    }

    out
}
