//! Classification orchestration: pattern analysis merged with an optional
//! external judgment.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use noesis_core::{
    ArtworkItem, ClassificationResult, Confidence, Decision, Evidence, ExternalJudgment,
    PreAnalysis,
};
use noesis_rules::{RuleSet, ScoringPolicy};

use crate::aggregator::{aggregate, NetworkSummary};
use crate::extractor::MetaphorExtractor;

/// Evidence previewed in the LLM hint.
pub const PREVIEW_EVIDENCE: usize = 3;
/// Trigger text longer than this is cut in the preview (in characters).
pub const PREVIEW_TEXT_CHARS: usize = 100;

/// Evidence plus its aggregate, for one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub evidence: Vec<Evidence>,
    pub summary: NetworkSummary,
}

/// Pure, thread-safe classifier over a compiled rule set.
#[derive(Debug, Clone)]
pub struct Classifier {
    extractor: MetaphorExtractor,
    policy: Arc<ScoringPolicy>,
}

impl Classifier {
    pub fn new(rules: &RuleSet) -> Self {
        Self {
            extractor: MetaphorExtractor::new(Arc::clone(&rules.ontology), Arc::clone(&rules.policy)),
            policy: Arc::clone(&rules.policy),
        }
    }

    pub fn extractor(&self) -> &MetaphorExtractor {
        &self.extractor
    }

    /// Extract and aggregate one text.
    pub fn analyze(&self, text: &str) -> Analysis {
        let evidence = self.extractor.extract(text);
        let summary = aggregate(&evidence, &self.policy);
        Analysis { evidence, summary }
    }

    /// Compact hint for the LLM prompt.
    pub fn pre_analysis(&self, text: &str) -> PreAnalysis {
        let Analysis { evidence, summary } = self.analyze(text);
        PreAnalysis {
            detected_metaphors: evidence.len(),
            meta_metaphor_present: summary.meta_metaphor_detected,
            dominant_theory: summary.dominant_theory,
            evidence_preview: evidence
                .into_iter()
                .take(PREVIEW_EVIDENCE)
                .map(|mut e| {
                    if e.trigger_text.chars().count() > PREVIEW_TEXT_CHARS {
                        e.trigger_text = e.trigger_text.chars().take(PREVIEW_TEXT_CHARS).collect();
                    }
                    e
                })
                .collect(),
        }
    }

    /// Classify one item. Never fails: with no evidence and no judgment the
    /// result is UND with low confidence. A blank description is always
    /// UND/low; any judgment for it is ignored.
    pub fn classify(
        &self,
        item: &ArtworkItem,
        judgment: Option<&ExternalJudgment>,
    ) -> ClassificationResult {
        let Analysis { evidence, summary } = self.analyze(&item.description);
        let pattern_theory = summary.dominant_theory;
        let judgment = judgment.filter(|_| !item.is_blank());

        let (primary_class, secondary_class, confidence, decision) = match judgment {
            None => (
                pattern_theory,
                summary.secondary_theory,
                summary.confidence,
                Decision::PatternOnly,
            ),
            Some(j) if j.primary == pattern_theory => (
                j.primary,
                j.secondary.or(summary.secondary_theory),
                j.confidence.max(summary.confidence),
                Decision::Agreed,
            ),
            Some(j) => (
                j.primary,
                j.secondary,
                j.confidence.min(Confidence::Medium),
                Decision::Disagreed,
            ),
        };
        let secondary_class = secondary_class.filter(|s| *s != primary_class);

        debug!(
            title = %item.title,
            evidence = evidence.len(),
            pattern = %pattern_theory,
            primary = %primary_class,
            decision = decision.as_str(),
            "classified item"
        );

        ClassificationResult {
            title: item.title.clone(),
            source_text: item.description.clone(),
            primary_class,
            secondary_class,
            hybrid: summary.hybrid,
            meta_metaphor_detected: summary.meta_metaphor_detected,
            confidence,
            decision,
            pattern_theory,
            theory_scores: summary.theory_scores,
            evidence,
        }
    }

}
