//! Metaphor network aggregation: evidence → theory distribution, dominant
//! and secondary theory, hybridity and confidence.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use noesis_core::{Confidence, Evidence, MetaphorLevel, Theory};
use noesis_rules::policy::TIE_EPSILON;
use noesis_rules::ScoringPolicy;

/// Per-theory evidence statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TheoryCluster {
    pub evidence_count: usize,
    pub meta_metaphor_count: usize,
    pub scientific_metaphor_count: usize,
    pub ontological_count: usize,
    /// Deepest level present, by depth rank.
    pub deepest_level: Option<MetaphorLevel>,
}

/// Aggregated view of one text's metaphor evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSummary {
    /// Level-weighted scores; theories without evidence are absent.
    pub theory_scores: BTreeMap<Theory, f64>,
    pub dominant_theory: Theory,
    pub secondary_theory: Option<Theory>,
    pub hybrid: bool,
    /// Theories with comparable scores, highest first.
    pub hybrid_theories: Vec<Theory>,
    pub meta_metaphor_detected: bool,
    pub confidence: Confidence,
    pub clusters: BTreeMap<Theory, TheoryCluster>,
}

impl NetworkSummary {
    pub fn score(&self, theory: Theory) -> f64 {
        self.theory_scores.get(&theory).copied().unwrap_or(0.0)
    }

    pub fn dominant_score(&self) -> f64 {
        self.score(self.dominant_theory)
    }
}

/// Aggregate evidence into a [`NetworkSummary`].
///
/// Independent of evidence order. UND evidence is scored and clustered but
/// never dominates a substantive theory and never counts toward hybridity.
pub fn aggregate(evidence: &[Evidence], policy: &ScoringPolicy) -> NetworkSummary {
    let mut contributions: BTreeMap<Theory, Vec<f64>> = BTreeMap::new();
    let mut clusters: BTreeMap<Theory, TheoryCluster> = BTreeMap::new();

    for e in evidence {
        contributions
            .entry(e.theory)
            .or_default()
            .push(e.weight * policy.level_multiplier(e.level));

        let cluster = clusters.entry(e.theory).or_default();
        cluster.evidence_count += 1;
        match e.level {
            MetaphorLevel::MetaMetaphor => cluster.meta_metaphor_count += 1,
            MetaphorLevel::ScientificMetaphor => cluster.scientific_metaphor_count += 1,
            _ => {}
        }
        if e.is_ontological() {
            cluster.ontological_count += 1;
        }
        if cluster
            .deepest_level
            .map_or(true, |d| e.level.depth_rank() > d.depth_rank())
        {
            cluster.deepest_level = Some(e.level);
        }
    }

    let theory_scores: BTreeMap<Theory, f64> = contributions
        .into_iter()
        .map(|(theory, mut parts)| {
            parts.sort_by(f64::total_cmp);
            (theory, parts.iter().sum())
        })
        .collect();

    let ranked = rank_substantive(&theory_scores, &clusters);

    let dominant_theory = ranked.first().copied().unwrap_or(Theory::Und);
    let max_score = theory_scores.get(&dominant_theory).copied().unwrap_or(0.0);
    let secondary_theory = if dominant_theory == Theory::Und {
        None
    } else {
        ranked
            .iter()
            .skip(1)
            .copied()
            .find(|t| theory_scores[t] >= policy.hybrid_floor)
    };

    let band_floor = max_score * (1.0 - policy.hybrid_band);
    let hybrid_theories: Vec<Theory> = ranked
        .iter()
        .copied()
        .filter(|t| {
            let s = theory_scores[t];
            s >= band_floor - TIE_EPSILON && s >= policy.hybrid_floor
        })
        .collect();
    let hybrid = hybrid_theories.len() >= 2;

    let meta_metaphor_detected = evidence
        .iter()
        .any(|e| e.level == MetaphorLevel::MetaMetaphor);

    let dominant_has_ontological = clusters
        .get(&dominant_theory)
        .is_some_and(|c| c.ontological_count > 0);
    let confidence = if dominant_theory == Theory::Und {
        Confidence::Low
    } else if max_score >= policy.high_confidence_score && dominant_has_ontological {
        Confidence::High
    } else if max_score >= policy.medium_confidence_score {
        Confidence::Medium
    } else {
        Confidence::Low
    };

    NetworkSummary {
        theory_scores,
        dominant_theory,
        secondary_theory,
        hybrid,
        hybrid_theories,
        meta_metaphor_detected,
        confidence,
        clusters,
    }
}

/// Substantive theories with a positive score, best first.
///
/// Scores within [`TIE_EPSILON`] are tied; ties go to the deepest metaphor
/// level present, then to more ontological evidence, then to declaration
/// order.
fn rank_substantive(
    scores: &BTreeMap<Theory, f64>,
    clusters: &BTreeMap<Theory, TheoryCluster>,
) -> Vec<Theory> {
    let depth = |t: Theory| {
        clusters
            .get(&t)
            .and_then(|c| c.deepest_level)
            .map(MetaphorLevel::depth_rank)
            .unwrap_or(0)
    };
    let ontological = |t: Theory| clusters.get(&t).map(|c| c.ontological_count).unwrap_or(0);
    let outranks = |a: Theory, b: Theory| {
        let (sa, sb) = (scores[&a], scores[&b]);
        if (sa - sb).abs() > TIE_EPSILON {
            return sa > sb;
        }
        (depth(a), ontological(a)) > (depth(b), ontological(b))
    };

    // Candidates start in declaration order; strict comparison keeps the
    // earlier theory on a full tie.
    let mut remaining: Vec<Theory> = scores
        .iter()
        .filter(|(t, s)| t.is_substantive() && **s > 0.0)
        .map(|(t, _)| *t)
        .collect();
    let mut ranked = Vec::with_capacity(remaining.len());
    while !remaining.is_empty() {
        let best = (1..remaining.len()).fold(0, |best, i| {
            if outranks(remaining[i], remaining[best]) {
                i
            } else {
                best
            }
        });
        ranked.push(remaining.remove(best));
    }
    ranked
}
