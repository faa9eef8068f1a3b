use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::evidence::Evidence;
use crate::theory::{Confidence, Theory};

/// Input record: one artwork with its free-text description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl ArtworkItem {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// True when there is no description text to analyze.
    pub fn is_blank(&self) -> bool {
        self.description.trim().is_empty()
    }
}

/// An already-resolved categorical judgment from the external LLM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalJudgment {
    pub primary: Theory,
    #[serde(default)]
    pub secondary: Option<Theory>,
    pub confidence: Confidence,
}

/// How the final class was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// No usable external judgment; pattern analysis only.
    PatternOnly,
    /// External judgment agreed with the pattern-dominant theory.
    Agreed,
    /// External judgment disagreed; it wins with capped confidence.
    Disagreed,
}

impl Decision {
    pub fn as_str(self) -> &'static str {
        match self {
            Decision::PatternOnly => "pattern_only",
            Decision::Agreed => "agreed",
            Decision::Disagreed => "disagreed",
        }
    }
}

/// Final per-item classification record consumed by reporting.
///
/// Contains no timestamps, so re-running on identical input serializes to
/// identical bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub title: String,
    pub source_text: String,
    pub primary_class: Theory,
    pub secondary_class: Option<Theory>,
    pub hybrid: bool,
    pub meta_metaphor_detected: bool,
    pub confidence: Confidence,
    pub decision: Decision,
    /// Dominant theory according to pattern analysis alone.
    pub pattern_theory: Theory,
    /// Level-weighted pattern scores; theories without evidence are absent.
    pub theory_scores: BTreeMap<Theory, f64>,
    pub evidence: Vec<Evidence>,
}

/// Compact pattern-analysis hint handed to the LLM prompt builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreAnalysis {
    pub detected_metaphors: usize,
    pub meta_metaphor_present: bool,
    pub dominant_theory: Theory,
    /// First few evidence records, trigger text truncated.
    pub evidence_preview: Vec<Evidence>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artwork_item_defaults_missing_fields() {
        let item: ArtworkItem = serde_json::from_str(r#"{"description": "swarm"}"#).unwrap();
        assert_eq!(item.title, "");
        assert_eq!(item.description, "swarm");
    }

    #[test]
    fn blank_description_detection() {
        assert!(ArtworkItem::new("t", "").is_blank());
        assert!(ArtworkItem::new("t", " \n\t ").is_blank());
        assert!(!ArtworkItem::new("t", " swarm ").is_blank());
    }

    #[test]
    fn judgment_secondary_optional() {
        let j: ExternalJudgment =
            serde_json::from_str(r#"{"primary": "PRED", "confidence": "high"}"#).unwrap();
        assert_eq!(j.primary, Theory::Pred);
        assert_eq!(j.secondary, None);
        assert_eq!(j.confidence, Confidence::High);
    }

    #[test]
    fn theory_scores_serialize_with_tag_keys() {
        let mut scores = BTreeMap::new();
        scores.insert(Theory::Iit, 1.0);
        let json = serde_json::to_string(&scores).unwrap();
        assert_eq!(json, r#"{"IIT":1.0}"#);
    }
}
