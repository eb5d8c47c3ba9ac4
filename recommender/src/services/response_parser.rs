//! Model output parsing

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{RecommenderError, RecommenderResult};
use crate::types::AiPayload;

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)```(?:json|JSON)?\s*(.*?)```").expect("fence pattern is valid")
    })
}

/// Strip a markdown code fence if the model wrapped its JSON in one
pub fn strip_code_fence(text: &str) -> &str {
    match fence_regex().captures(text).and_then(|c| c.get(1)) {
        Some(body) => body.as_str().trim(),
        None => text.trim(),
    }
}

/// Parse raw model text into a payload with at least one recommendation
pub fn parse_ai_payload(text: &str) -> RecommenderResult<AiPayload> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(RecommenderError::parse("empty model output"));
    }

    let payload: AiPayload = serde_json::from_str(body)
        .map_err(|e| RecommenderError::parse(format!("invalid recommendation JSON: {e}")))?;

    if payload.recommendations.is_empty() {
        return Err(RecommenderError::parse("model returned no recommendations"));
    }

    Ok(payload)
}
