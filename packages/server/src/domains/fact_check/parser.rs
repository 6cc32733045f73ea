//! Turns a raw `generateContent` payload into the fact-check mapping.
//!
//! The model is asked for JSON but grounded responses are not schema-enforced:
//! the text may arrive fenced, with a preamble, or as a bare claim list.

use gemini_client::strip_code_blocks;
use serde_json::{json, Map, Value};
use tracing::debug;

use super::errors::AnalysisError;

/// Summary used when the model answers with a bare claim list.
pub const DEFAULT_SUMMARY: &str = "Analysis complete.";

/// Extract `{summaryVerdict, claims, ..}` from a provider payload.
pub fn parse_gemini_response(payload: &Value) -> Result<Map<String, Value>, AnalysisError> {
    let text = candidate_text(payload)?;
    let cleaned = strip_code_blocks(text);

    let value = match serde_json::from_str::<Value>(cleaned) {
        Ok(value) => value,
        Err(direct_err) => match locate_json(cleaned) {
            Some(fragment) => {
                debug!("Direct JSON parse failed, retrying on embedded fragment");
                serde_json::from_str(fragment).map_err(AnalysisError::MalformedResponse)?
            }
            None => return Err(AnalysisError::MalformedResponse(direct_err)),
        },
    };

    match value {
        Value::Object(map) => Ok(map),
        Value::Array(claims) => {
            let mut map = Map::new();
            map.insert("summaryVerdict".into(), json!(DEFAULT_SUMMARY));
            map.insert("claims".into(), Value::Array(claims));
            Ok(map)
        }
        other => Err(AnalysisError::UnexpectedShape(format!(
            "expected a JSON object or array, got {}",
            type_name(&other)
        ))),
    }
}

/// Text of the first candidate's first content part.
fn candidate_text(payload: &Value) -> Result<&str, AnalysisError> {
    let candidate = payload
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|c| c.first())
        .ok_or_else(|| AnalysisError::EmptyResponse("no candidates in response".into()))?;

    let part = candidate
        .get("content")
        .and_then(|c| c.get("parts"))
        .and_then(Value::as_array)
        .and_then(|p| p.first())
        .ok_or_else(|| {
            let reason = candidate
                .get("finishReason")
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            AnalysisError::EmptyResponse(format!(
                "candidate has no content parts (finishReason: {})",
                reason
            ))
        })?;

    Ok(part.get("text").and_then(Value::as_str).unwrap_or(""))
}

/// First-opening to last-closing bracket span of whichever JSON container starts first.
fn locate_json(text: &str) -> Option<&str> {
    let object = text.find('{').map(|start| (start, '}'));
    let array = text.find('[').map(|start| (start, ']'));

    let (start, close) = match (object, array) {
        (Some(o), Some(a)) => {
            if o.0 < a.0 {
                o
            } else {
                a
            }
        }
        (Some(o), None) => o,
        (None, Some(a)) => a,
        (None, None) => return None,
    };

    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Search queries the model issued while grounding.
///
/// Never fails: missing or malformed metadata yields an empty list.
pub fn extract_search_queries(payload: &Value) -> Vec<String> {
    let queries = payload
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|c| c.first())
        .and_then(|c| c.get("groundingMetadata"))
        .and_then(|m| m.get("webSearchQueries"))
        .and_then(Value::as_array);

    match queries {
        Some(queries) => queries
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        None => {
            debug!("No webSearchQueries in grounding metadata");
            Vec::new()
        }
    }
}
