//! Validation for ScoringPolicy documents.

use noesis_core::MetaphorLevel;

use super::{validate_header, ValidationResult};
use crate::policy::ScoringPolicyRule;

pub(crate) fn validate_policy(rule: &ScoringPolicyRule, result: &mut ValidationResult) {
    validate_header(
        &rule.api_version,
        &rule.kind,
        "ScoringPolicy",
        &rule.metadata.id,
        result,
    );

    let p = &rule.spec;

    if p.meta_window_tokens == 0 {
        result.error("spec.meta_window_tokens", "meta window must be at least 1 token");
    }
    if !(p.meta_boost.is_finite() && p.meta_boost > 0.0) {
        result.error(
            "spec.meta_boost",
            format!("meta_boost must be positive, got {}", p.meta_boost),
        );
    } else if p.meta_boost < 1.0 {
        result.warn(
            "spec.meta_boost",
            format!("meta_boost {} weakens meta-metaphor evidence", p.meta_boost),
        );
    }

    for level in MetaphorLevel::ALL {
        let m = p.level_multiplier(level);
        if !(m.is_finite() && m > 0.0) {
            result.error(
                format!("spec.level_multipliers.{}", level),
                format!("multiplier must be positive, got {}", m),
            );
        }
    }

    if !(0.0..1.0).contains(&p.hybrid_band) {
        result.error(
            "spec.hybrid_band",
            format!("hybrid_band must be in [0, 1), got {}", p.hybrid_band),
        );
    }
    if !(p.hybrid_floor.is_finite() && p.hybrid_floor >= 0.0) {
        result.error(
            "spec.hybrid_floor",
            format!("hybrid_floor must be non-negative, got {}", p.hybrid_floor),
        );
    }

    if !(p.medium_confidence_score.is_finite() && p.medium_confidence_score > 0.0) {
        result.error(
            "spec.medium_confidence_score",
            format!("must be positive, got {}", p.medium_confidence_score),
        );
    }
    if p.high_confidence_score < p.medium_confidence_score {
        result.error(
            "spec.high_confidence_score",
            format!(
                "high_confidence_score ({}) must not be below medium_confidence_score ({})",
                p.high_confidence_score, p.medium_confidence_score
            ),
        );
    }

    if !(0.0..=1.0).contains(&p.negation_factor) || p.negation_factor == 0.0 {
        result.error(
            "spec.negation_factor",
            format!("negation_factor must be in (0, 1], got {}", p.negation_factor),
        );
    }
}
