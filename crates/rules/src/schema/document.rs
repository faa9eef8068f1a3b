//! Multi-kind rule document container and accessors.

use super::{CommonMetadata, RuleKind};
use crate::ontology::PatternOntologyRule;
use crate::policy::ScoringPolicyRule;

/// A fully deserialized rule document of any supported kind.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleDocument {
    /// Theory patterns, artistic markers and negation cues.
    PatternOntology(PatternOntologyRule),
    /// Scoring constants for extraction and aggregation.
    ScoringPolicy(ScoringPolicyRule),
}

impl RuleDocument {
    /// Deserialize a (possibly extends-merged) YAML value as the given kind.
    pub fn from_value(
        kind: RuleKind,
        value: serde_yaml::Value,
    ) -> std::result::Result<Self, String> {
        match kind {
            RuleKind::PatternOntology => serde_yaml::from_value::<PatternOntologyRule>(value)
                .map(RuleDocument::PatternOntology)
                .map_err(|e| e.to_string()),
            RuleKind::ScoringPolicy => serde_yaml::from_value::<ScoringPolicyRule>(value)
                .map(RuleDocument::ScoringPolicy)
                .map_err(|e| e.to_string()),
        }
    }

    /// Get the document's metadata regardless of kind.
    pub fn metadata(&self) -> &CommonMetadata {
        match self {
            RuleDocument::PatternOntology(rule) => &rule.metadata,
            RuleDocument::ScoringPolicy(rule) => &rule.metadata,
        }
    }

    /// Get the rule kind.
    pub fn kind(&self) -> RuleKind {
        match self {
            RuleDocument::PatternOntology(_) => RuleKind::PatternOntology,
            RuleDocument::ScoringPolicy(_) => RuleKind::ScoringPolicy,
        }
    }

    pub fn as_ontology(&self) -> Option<&PatternOntologyRule> {
        match self {
            RuleDocument::PatternOntology(rule) => Some(rule),
            _ => None,
        }
    }

    pub fn as_policy(&self) -> Option<&ScoringPolicyRule> {
        match self {
            RuleDocument::ScoringPolicy(rule) => Some(rule),
            _ => None,
        }
    }

    /// Serialize this document to YAML, delegating to the inner type.
    pub fn to_yaml(&self) -> std::result::Result<String, serde_yaml::Error> {
        match self {
            RuleDocument::PatternOntology(r) => serde_yaml::to_string(r),
            RuleDocument::ScoringPolicy(r) => serde_yaml::to_string(r),
        }
    }
}
