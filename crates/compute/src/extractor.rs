//! Metaphor evidence extraction.
//!
//! Scans a text against every pattern of the ontology, weakens negated
//! matches, and upgrades scientific metaphors that sit next to artistic
//! vocabulary into synthesized meta-metaphor evidence.

use std::cmp::Ordering;
use std::sync::Arc;

use noesis_core::{Evidence, MetaphorLevel, Span};
use noesis_rules::{PatternOntology, ScoringPolicy};

use crate::tokens::TokenIndex;

/// Stateless extractor over a shared, immutable ontology and policy.
#[derive(Debug, Clone)]
pub struct MetaphorExtractor {
    ontology: Arc<PatternOntology>,
    policy: Arc<ScoringPolicy>,
}

/// An artistic marker occurrence.
struct MarkerHit {
    span: Span,
    first: usize,
    last: usize,
    sentence: usize,
}

impl MetaphorExtractor {
    pub fn new(ontology: Arc<PatternOntology>, policy: Arc<ScoringPolicy>) -> Self {
        Self { ontology, policy }
    }

    pub fn ontology(&self) -> &PatternOntology {
        &self.ontology
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Extract evidence ordered by span start, span end, theory, level.
    ///
    /// Total over all strings: blank input yields no evidence. A match never
    /// crosses a sentence break.
    pub fn extract(&self, text: &str) -> Vec<Evidence> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        let tokens = TokenIndex::new(text);

        let mut evidence = Vec::new();
        for pattern in self.ontology.all_patterns() {
            for span in pattern.find_spans(text) {
                let Some((first, last)) = tokens.token_range(span) else {
                    continue;
                };
                if tokens.sentence(first) != tokens.sentence(last) {
                    continue;
                }
                let mut weight = pattern.base_weight;
                if self.is_negated(&tokens, first) {
                    weight *= self.policy.negation_factor;
                }
                evidence.push(Evidence {
                    theory: pattern.theory,
                    level: pattern.level,
                    ontological_type: pattern.ontological_type,
                    weight,
                    trigger_text: text[span.start..span.end].to_string(),
                    span,
                });
            }
        }

        let markers = self.marker_hits(text, &tokens);
        let upgrades: Vec<Evidence> = evidence
            .iter()
            .filter(|e| e.level == MetaphorLevel::ScientificMetaphor)
            .filter_map(|e| self.meta_upgrade(e, text, &tokens, &markers))
            .collect();
        evidence.extend(upgrades);

        evidence.sort_by(evidence_order);
        evidence
    }

    /// A negation cue among the `negation_window_tokens` tokens before
    /// `first`, in the same sentence.
    fn is_negated(&self, tokens: &TokenIndex<'_>, first: usize) -> bool {
        let window = self.policy.negation_window_tokens;
        let sentence = tokens.sentence(first);
        (first.saturating_sub(window)..first)
            .filter(|&i| tokens.sentence(i) == sentence)
            .any(|i| self.ontology.is_negation_cue(tokens.text(i)))
    }

    fn marker_hits(&self, text: &str, tokens: &TokenIndex<'_>) -> Vec<MarkerHit> {
        let mut hits: Vec<MarkerHit> = Vec::new();
        for marker in self.ontology.artistic_markers() {
            for span in marker.find_spans(text) {
                if hits.iter().any(|h| h.span == span) {
                    continue;
                }
                if let Some((first, last)) = tokens.token_range(span) {
                    hits.push(MarkerHit {
                        span,
                        first,
                        last,
                        sentence: tokens.sentence(first),
                    });
                }
            }
        }
        hits.sort_by_key(|h| (h.span.start, h.span.end));
        hits
    }

    /// Synthesize one meta-metaphor for a scientific metaphor with a nearby
    /// artistic marker. The nearest marker wins, then the earliest.
    fn meta_upgrade(
        &self,
        scientific: &Evidence,
        text: &str,
        tokens: &TokenIndex<'_>,
        markers: &[MarkerHit],
    ) -> Option<Evidence> {
        let (first, last) = tokens.token_range(scientific.span)?;
        let sentence = tokens.sentence(first);
        let window = self.policy.meta_window_tokens;

        let nearest = markers
            .iter()
            .filter(|m| m.sentence == sentence && !m.span.overlaps(&scientific.span))
            .filter_map(|m| {
                let distance = if m.first > last {
                    m.first - last
                } else {
                    first.saturating_sub(m.last)
                };
                (distance <= window).then_some((distance, m))
            })
            .min_by_key(|(distance, m)| (*distance, m.span.start))?
            .1;

        Some(Evidence {
            theory: scientific.theory,
            level: MetaphorLevel::MetaMetaphor,
            ontological_type: scientific.ontological_type,
            weight: (scientific.weight * self.policy.meta_boost).min(1.0),
            trigger_text: format!(
                "{} ~ {}",
                scientific.trigger_text,
                &text[nearest.span.start..nearest.span.end]
            ),
            span: scientific.span,
        })
    }
}

/// Total order over evidence so extraction output is reproducible.
pub fn evidence_order(a: &Evidence, b: &Evidence) -> Ordering {
    a.span
        .start
        .cmp(&b.span.start)
        .then(a.span.end.cmp(&b.span.end))
        .then(a.theory.cmp(&b.theory))
        .then(a.level.cmp(&b.level))
        .then_with(|| a.trigger_text.cmp(&b.trigger_text))
        .then_with(|| a.weight.total_cmp(&b.weight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use noesis_core::{OntologicalType, Theory};
    use noesis_rules::RuleSet;

    fn extractor() -> MetaphorExtractor {
        let rules = RuleSet::embedded().unwrap();
        MetaphorExtractor::new(rules.ontology, rules.policy)
    }

    fn of(evidence: &[Evidence], theory: Theory, level: MetaphorLevel) -> Vec<&Evidence> {
        evidence
            .iter()
            .filter(|e| e.theory == theory && e.level == level)
            .collect()
    }

    #[test]
    fn blank_input_yields_nothing() {
        let x = extractor();
        assert!(x.extract("").is_empty());
        assert!(x.extract(" \n\t ").is_empty());
    }

    #[test]
    fn meta_upgrade_for_brain_predicts_near_generative_model() {
        let x = extractor();
        let ev = x.extract("The brain predicts the world, and this generative model imagines it.");
        let sci = of(&ev, Theory::Pred, MetaphorLevel::ScientificMetaphor);
        let meta = of(&ev, Theory::Pred, MetaphorLevel::MetaMetaphor);
        let brain = sci
            .iter()
            .find(|e| e.trigger_text == "brain predicts")
            .expect("scientific evidence");
        let upgraded = meta
            .iter()
            .find(|e| e.span == brain.span)
            .expect("synthesized meta evidence");
        assert_eq!(upgraded.trigger_text, "brain predicts ~ generative");
        assert_eq!(upgraded.ontological_type, OntologicalType::Ontological);
        assert!((upgraded.weight - (brain.weight * 1.2).min(1.0)).abs() < 1e-12);
    }

    #[test]
    fn no_upgrade_across_sentences() {
        let x = extractor();
        let ev = x.extract("The brain predicts. A generative model paints.");
        let brain: Vec<_> = ev
            .iter()
            .filter(|e| e.trigger_text.starts_with("brain predicts"))
            .collect();
        assert_eq!(brain.len(), 1);
        assert_eq!(brain[0].level, MetaphorLevel::ScientificMetaphor);
    }

    #[test]
    fn no_upgrade_beyond_window() {
        let x = extractor();
        let filler = "and then ".repeat(8);
        let text = format!("The brain predicts {filler}a generative piece");
        let ev = x.extract(&text);
        assert!(!ev
            .iter()
            .any(|e| e.level == MetaphorLevel::MetaMetaphor && e.trigger_text.starts_with("brain predicts")));
    }

    #[test]
    fn negation_reduces_weight() {
        let x = extractor();
        let plain = x.extract("It shows integrated information.");
        let negated = x.extract("It is not integrated information.");
        let w = |ev: &[Evidence]| {
            ev.iter()
                .find(|e| e.theory == Theory::Iit && e.level == MetaphorLevel::ExplicitTerm)
                .map(|e| e.weight)
                .unwrap()
        };
        assert!((w(&negated) - w(&plain) * 0.5).abs() < 1e-12);
    }

    #[test]
    fn cyrillic_triggers_match() {
        let x = extractor();
        let ev = x.extract("Мозг постоянно предсказывает мир, а нейросеть рисует сны.");
        let pred = of(&ev, Theory::Pred, MetaphorLevel::ScientificMetaphor);
        assert_eq!(pred.len(), 1);
        let meta = of(&ev, Theory::Pred, MetaphorLevel::MetaMetaphor);
        assert_eq!(meta.len(), 1);
        assert!(meta[0].trigger_text.ends_with("~ нейросеть"));
    }

    #[test]
    fn overlapping_theories_all_kept() {
        let x = extractor();
        let ev = x.extract("A swarm mind machine.");
        let emerg = ev.iter().find(|e| e.theory == Theory::Emerg).unwrap();
        let comp = ev.iter().find(|e| e.theory == Theory::Comp).unwrap();
        assert_eq!(emerg.trigger_text, "swarm mind");
        assert_eq!(comp.trigger_text, "mind machine");
        assert!(emerg.span.overlaps(&comp.span));
    }

    #[test]
    fn output_is_ordered() {
        let x = extractor();
        let ev = x.extract(
            "A global workspace broadcasts while the brain predicts; the generative model is embodied.",
        );
        let mut sorted = ev.clone();
        sorted.sort_by(evidence_order);
        assert_eq!(ev, sorted);
        assert!(ev.windows(2).all(|w| w[0].span.start <= w[1].span.start));
    }

    #[test]
    fn extraction_is_deterministic() {
        let x = extractor();
        let text = "Swarm intelligence, emergent and self-organizing, predicts nothing.";
        assert_eq!(x.extract(text), x.extract(text));
    }
}
