//! Utilities for extracting structured payloads from model responses.
//!
//! Even with JSON mode requested, model responses sometimes arrive wrapped in
//! markdown fences or preceded by commentary. These helpers locate the JSON
//! document inside a raw response before typed validation.

use cellini_error::{AgentError, AgentErrorKind};

/// Extract the JSON document from a response that may contain markdown or
/// surrounding text.
///
/// Tries, in order: a fenced ```json block, a balanced `{...}` object, a
/// balanced `[...]` array. Agent outputs are always objects, so objects are
/// preferred over arrays.
///
/// # Errors
///
/// Returns a validation failure if no JSON document is found.
///
/// # Examples
///
/// ```
/// use cellini_agents::extract_json;
///
/// let response = "Here you go:\n```json\n{\"score\": 9.5}\n```\n";
/// let json = extract_json(response).unwrap();
/// assert!(json.contains("9.5"));
/// ```
pub fn extract_json(response: &str) -> Result<String, AgentError> {
    if let Some(block) = fenced_block(response) {
        return Ok(block);
    }
    if let Some(object) = balanced_span(response, '{', '}') {
        return Ok(object);
    }
    if let Some(array) = balanced_span(response, '[', ']') {
        return Ok(array);
    }

    tracing::error!(
        response_length = response.len(),
        "No JSON found in model response"
    );
    Err(AgentError::new(AgentErrorKind::ValidationFailure(format!(
        "No JSON found in response ({} chars)",
        response.len()
    ))))
}

/// Parse an extracted JSON string into a typed value.
///
/// # Errors
///
/// Returns a validation failure carrying a short preview of the offending
/// payload when parsing fails.
pub fn parse_json<T>(json: &str) -> Result<T, AgentError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(json).map_err(|e| {
        let preview: String = json.chars().take(100).collect();
        tracing::error!(error = %e, json_preview = %preview, "JSON validation failed");
        AgentError::new(AgentErrorKind::ValidationFailure(format!(
            "{} (payload: {}...)",
            e, preview
        )))
    })
}

/// Pull the contents of the first markdown code fence, skipping an optional
/// language tag. A missing closing fence means the response was truncated;
/// everything after the opening fence is returned so validation can report
/// the real problem.
fn fenced_block(response: &str) -> Option<String> {
    let start = response.find("```")?;
    let after_fence = start + 3;
    // Skip the language tag line ("json", "JSON", or nothing)
    let body_start = response[after_fence..]
        .find('\n')
        .map(|n| after_fence + n + 1)
        .unwrap_or(after_fence);

    match response[body_start..].find("```") {
        Some(end) => Some(response[body_start..body_start + end].trim().to_string()),
        None => Some(response[body_start..].trim().to_string()),
    }
}

/// Find the first span delimited by `open`/`close` with balanced nesting,
/// ignoring delimiters inside JSON strings.
fn balanced_span(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in response[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(response[start..start + offset + ch.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_json_fence() {
        let response = "Sure, here is the result:\n\n```json\n{\n  \"score\": 10.0\n}\n```\nDone.";
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.contains("10.0"));
    }

    #[test]
    fn extracts_from_untagged_fence() {
        let response = "```\n{\"approved\": true}\n```";
        let json = extract_json(response).unwrap();
        assert_eq!(json, "{\"approved\": true}");
    }

    #[test]
    fn extracts_balanced_object_from_prose() {
        let response = "The verdict: {\"approved\": false, \"detail\": {\"why\": \"drift\"}} end";
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.ends_with('}'));
        assert!(json.contains("drift"));
    }

    #[test]
    fn braces_inside_strings_do_not_confuse_extraction() {
        let response = r#"{"feedback": "use {color} locks", "score": 0.0}"#;
        let json = extract_json(response).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["score"], 0.0);
    }

    #[test]
    fn escaped_quotes_are_handled() {
        let response = r#"{"feedback": "she said \"never\""}"#;
        let json = extract_json(response).unwrap();
        assert!(json.contains("never"));
    }

    #[test]
    fn plain_text_is_a_validation_failure() {
        let err = extract_json("no structured data here").unwrap_err();
        assert!(matches!(err.kind, AgentErrorKind::ValidationFailure(_)));
    }

    #[test]
    fn truncated_fence_returns_remainder() {
        let response = "```json\n{\"partial\": true";
        let json = extract_json(response).unwrap();
        assert!(json.contains("partial"));
    }

    #[test]
    fn parse_json_reports_preview_on_failure() {
        #[derive(serde::Deserialize, Debug)]
        struct Needs {
            #[allow(dead_code)]
            score: f64,
        }
        let err = parse_json::<Needs>("{\"score\": \"high\"}").unwrap_err();
        match err.kind {
            AgentErrorKind::ValidationFailure(msg) => assert!(msg.contains("high")),
            other => panic!("unexpected kind: {other}"),
        }
    }
}
