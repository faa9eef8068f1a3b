//! ScoringPolicy rule kind: every heuristic constant used by metaphor
//! extraction and network aggregation.
//!
//! Each field falls back to its `DEFAULT_*` constant when omitted, so a
//! policy document only needs to name the values it changes.

use serde::{Deserialize, Serialize};

use noesis_core::MetaphorLevel;

use crate::schema::CommonMetadata;

/// Tokens between a scientific metaphor and an artistic marker that still
/// count as "nearby" for the meta-metaphor upgrade.
pub const DEFAULT_META_WINDOW_TOKENS: usize = 12;
/// Weight multiplier for synthesized meta-metaphor evidence (capped at 1.0).
pub const DEFAULT_META_BOOST: f64 = 1.2;
pub const DEFAULT_EXPLICIT_TERM_MULTIPLIER: f64 = 1.0;
pub const DEFAULT_SCIENTIFIC_METAPHOR_MULTIPLIER: f64 = 1.1;
pub const DEFAULT_META_METAPHOR_MULTIPLIER: f64 = 1.5;
pub const DEFAULT_NESTED_METAPHOR_MULTIPLIER: f64 = 1.3;
/// Theories within this fraction of the maximum score are "comparable".
pub const DEFAULT_HYBRID_BAND: f64 = 0.2;
/// Minimum absolute score for a theory to count toward hybridity.
pub const DEFAULT_HYBRID_FLOOR: f64 = 0.3;
pub const DEFAULT_HIGH_CONFIDENCE_SCORE: f64 = 1.5;
pub const DEFAULT_MEDIUM_CONFIDENCE_SCORE: f64 = 0.6;
/// Weight factor applied to a match preceded by a negation cue.
pub const DEFAULT_NEGATION_FACTOR: f64 = 0.5;
/// Tokens before a match searched for a negation cue.
pub const DEFAULT_NEGATION_WINDOW_TOKENS: usize = 3;
/// Scores closer than this are tied.
pub const TIE_EPSILON: f64 = 1e-9;

// ── YAML-level types ────────────────────────────────────────────────

/// Top-level ScoringPolicy rule document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringPolicyRule {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    pub metadata: CommonMetadata,
    #[serde(default)]
    pub spec: ScoringPolicy,
}

/// Scoring constants. Already typed, so the YAML spec is also the compiled form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringPolicy {
    #[serde(default = "default_meta_window_tokens")]
    pub meta_window_tokens: usize,
    #[serde(default = "default_meta_boost")]
    pub meta_boost: f64,
    #[serde(default)]
    pub level_multipliers: LevelMultipliers,
    #[serde(default = "default_hybrid_band")]
    pub hybrid_band: f64,
    #[serde(default = "default_hybrid_floor")]
    pub hybrid_floor: f64,
    /// Max score needed (with ontological evidence) for high confidence.
    #[serde(default = "default_high_confidence_score")]
    pub high_confidence_score: f64,
    #[serde(default = "default_medium_confidence_score")]
    pub medium_confidence_score: f64,
    #[serde(default = "default_negation_factor")]
    pub negation_factor: f64,
    /// 0 disables negation handling.
    #[serde(default = "default_negation_window_tokens")]
    pub negation_window_tokens: usize,
}

/// Per-level score multipliers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LevelMultipliers {
    #[serde(default = "default_explicit_term")]
    pub explicit_term: f64,
    #[serde(default = "default_scientific_metaphor")]
    pub scientific_metaphor: f64,
    #[serde(default = "default_meta_metaphor")]
    pub meta_metaphor: f64,
    #[serde(default = "default_nested_metaphor")]
    pub nested_metaphor: f64,
}

fn default_meta_window_tokens() -> usize {
    DEFAULT_META_WINDOW_TOKENS
}
fn default_meta_boost() -> f64 {
    DEFAULT_META_BOOST
}
fn default_hybrid_band() -> f64 {
    DEFAULT_HYBRID_BAND
}
fn default_hybrid_floor() -> f64 {
    DEFAULT_HYBRID_FLOOR
}
fn default_high_confidence_score() -> f64 {
    DEFAULT_HIGH_CONFIDENCE_SCORE
}
fn default_medium_confidence_score() -> f64 {
    DEFAULT_MEDIUM_CONFIDENCE_SCORE
}
fn default_negation_factor() -> f64 {
    DEFAULT_NEGATION_FACTOR
}
fn default_negation_window_tokens() -> usize {
    DEFAULT_NEGATION_WINDOW_TOKENS
}
fn default_explicit_term() -> f64 {
    DEFAULT_EXPLICIT_TERM_MULTIPLIER
}
fn default_scientific_metaphor() -> f64 {
    DEFAULT_SCIENTIFIC_METAPHOR_MULTIPLIER
}
fn default_meta_metaphor() -> f64 {
    DEFAULT_META_METAPHOR_MULTIPLIER
}
fn default_nested_metaphor() -> f64 {
    DEFAULT_NESTED_METAPHOR_MULTIPLIER
}

impl Default for LevelMultipliers {
    fn default() -> Self {
        Self {
            explicit_term: DEFAULT_EXPLICIT_TERM_MULTIPLIER,
            scientific_metaphor: DEFAULT_SCIENTIFIC_METAPHOR_MULTIPLIER,
            meta_metaphor: DEFAULT_META_METAPHOR_MULTIPLIER,
            nested_metaphor: DEFAULT_NESTED_METAPHOR_MULTIPLIER,
        }
    }
}

impl LevelMultipliers {
    pub fn get(&self, level: MetaphorLevel) -> f64 {
        match level {
            MetaphorLevel::ExplicitTerm => self.explicit_term,
            MetaphorLevel::ScientificMetaphor => self.scientific_metaphor,
            MetaphorLevel::MetaMetaphor => self.meta_metaphor,
            MetaphorLevel::NestedMetaphor => self.nested_metaphor,
        }
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            meta_window_tokens: DEFAULT_META_WINDOW_TOKENS,
            meta_boost: DEFAULT_META_BOOST,
            level_multipliers: LevelMultipliers::default(),
            hybrid_band: DEFAULT_HYBRID_BAND,
            hybrid_floor: DEFAULT_HYBRID_FLOOR,
            high_confidence_score: DEFAULT_HIGH_CONFIDENCE_SCORE,
            medium_confidence_score: DEFAULT_MEDIUM_CONFIDENCE_SCORE,
            negation_factor: DEFAULT_NEGATION_FACTOR,
            negation_window_tokens: DEFAULT_NEGATION_WINDOW_TOKENS,
        }
    }
}

impl ScoringPolicy {
    pub fn level_multiplier(&self, level: MetaphorLevel) -> f64 {
        self.level_multipliers.get(level)
    }
}

impl ScoringPolicyRule {
    /// Compile the YAML policy (trivial, spec is already typed).
    pub fn compile(&self) -> ScoringPolicy {
        self.spec.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shipped() -> ScoringPolicyRule {
        let yaml = include_str!("../../../data/rules/scoring/scoring-policy.yml");
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn shipped_policy_equals_defaults() {
        let rule = shipped();
        assert_eq!(rule.kind, "ScoringPolicy");
        assert_eq!(rule.compile(), ScoringPolicy::default());
    }

    #[test]
    fn meta_window_is_twelve_tokens() {
        assert_eq!(DEFAULT_META_WINDOW_TOKENS, 12);
        assert_eq!(ScoringPolicy::default().meta_window_tokens, 12);
    }

    #[test]
    fn meta_boost_is_one_point_two() {
        assert_eq!(DEFAULT_META_BOOST, 1.2);
    }

    #[test]
    fn level_multipliers_rank_meta_highest() {
        let m = LevelMultipliers::default();
        assert_eq!(m.get(MetaphorLevel::ExplicitTerm), 1.0);
        assert_eq!(m.get(MetaphorLevel::ScientificMetaphor), 1.1);
        assert_eq!(m.get(MetaphorLevel::MetaMetaphor), 1.5);
        assert_eq!(m.get(MetaphorLevel::NestedMetaphor), 1.3);
    }

    #[test]
    fn hybrid_band_is_twenty_percent() {
        assert_eq!(DEFAULT_HYBRID_BAND, 0.2);
    }

    #[test]
    fn hybrid_floor_is_point_three() {
        assert_eq!(DEFAULT_HYBRID_FLOOR, 0.3);
    }

    #[test]
    fn confidence_thresholds_ordered() {
        assert_eq!(DEFAULT_HIGH_CONFIDENCE_SCORE, 1.5);
        assert_eq!(DEFAULT_MEDIUM_CONFIDENCE_SCORE, 0.6);
        assert!(DEFAULT_MEDIUM_CONFIDENCE_SCORE < DEFAULT_HIGH_CONFIDENCE_SCORE);
    }

    #[test]
    fn negation_halves_weight_within_three_tokens() {
        assert_eq!(DEFAULT_NEGATION_FACTOR, 0.5);
        assert_eq!(DEFAULT_NEGATION_WINDOW_TOKENS, 3);
    }

    #[test]
    fn tie_epsilon_is_tiny() {
        assert_eq!(TIE_EPSILON, 1e-9);
    }

    #[test]
    fn partial_spec_keeps_other_defaults() {
        let yaml = r#"
apiVersion: v1
kind: ScoringPolicy
metadata:
  id: wide-window
  name: Wide Window
spec:
  meta_window_tokens: 20
  level_multipliers:
    meta_metaphor: 2.0
"#;
        let rule: ScoringPolicyRule = serde_yaml::from_str(yaml).unwrap();
        let policy = rule.compile();
        assert_eq!(policy.meta_window_tokens, 20);
        assert_eq!(policy.level_multiplier(MetaphorLevel::MetaMetaphor), 2.0);
        assert_eq!(policy.level_multiplier(MetaphorLevel::NestedMetaphor), 1.3);
        assert_eq!(policy.hybrid_floor, DEFAULT_HYBRID_FLOOR);
    }

    #[test]
    fn unknown_policy_field_rejected() {
        let yaml = r#"
apiVersion: v1
kind: ScoringPolicy
metadata:
  id: typo
  name: Typo
spec:
  hybrid_bnad: 0.3
"#;
        assert!(serde_yaml::from_str::<ScoringPolicyRule>(yaml).is_err());
    }
}
