//! Parsing the model's answer into an [`ExternalJudgment`].

use serde::Deserialize;

use noesis_core::{Confidence, ExternalJudgment, Theory};

/// The fields we read from the model's JSON answer. Anything else the model
/// adds (scores, evidence, notes) is ignored.
#[derive(Debug, Deserialize)]
pub struct RawJudgment {
    pub primary_class: String,
    #[serde(default)]
    pub secondary_class: Option<String>,
    pub confidence: String,
}

#[derive(Debug, thiserror::Error)]
pub enum JudgmentError {
    #[error("response contains no JSON object")]
    NoJson,
    #[error("invalid judgment JSON: {reason}")]
    InvalidJson {
        reason: String,
        raw_response: String,
    },
    #[error("unrecognized theory tag: '{0}'")]
    UnknownTheory(String),
    #[error("unrecognized confidence label: '{0}'")]
    UnknownConfidence(String),
}

/// Extract JSON from an LLM response, handling markdown code blocks.
pub fn extract_json(response: &str) -> Option<&str> {
    let trimmed = response.trim();

    // ```json ... ``` or ``` ... ```
    if let Some(start) = trimmed.find("```") {
        let after_tick = &trimmed[start + 3..];
        let content_start = after_tick.find('\n').map_or(0, |n| n + 1);
        if let Some(end) = after_tick[content_start..].find("```") {
            let inner = after_tick[content_start..content_start + end].trim();
            if inner.starts_with('{') {
                return Some(inner);
            }
        }
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    (end > start).then(|| &trimmed[start..=end])
}

fn parse_secondary(value: Option<String>) -> Result<Option<Theory>, JudgmentError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("none") || s.eq_ignore_ascii_case("null") => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|_| JudgmentError::UnknownTheory(s.to_string())),
    }
}

/// Parse a raw model response. Any failure makes the judgment unusable.
pub fn parse_judgment(response: &str) -> Result<ExternalJudgment, JudgmentError> {
    let json = extract_json(response).ok_or(JudgmentError::NoJson)?;
    let raw: RawJudgment = serde_json::from_str(json).map_err(|e| JudgmentError::InvalidJson {
        reason: e.to_string(),
        raw_response: response.to_string(),
    })?;

    let primary: Theory = raw
        .primary_class
        .parse()
        .map_err(|_| JudgmentError::UnknownTheory(raw.primary_class.clone()))?;
    let confidence: Confidence = raw
        .confidence
        .parse()
        .map_err(|_| JudgmentError::UnknownConfidence(raw.confidence.clone()))?;
    let secondary = parse_secondary(raw.secondary_class)?.filter(|s| *s != primary);

    Ok(ExternalJudgment {
        primary,
        secondary,
        confidence,
    })
}
