//! End-to-end classification over the shipped rule set.

use noesis_compute::{classify_batch, BatchSummary, Classifier};
use noesis_core::{ArtworkItem, Confidence, Decision, Theory};
use noesis_rules::RuleSet;

fn classifier() -> Classifier {
    Classifier::new(&RuleSet::embedded().expect("embedded rules compile"))
}

/// One clear description per tag.
fn corpus() -> Vec<(Theory, ArtworkItem)> {
    vec![
        (
            Theory::Comp,
            ArtworkItem::new("Machine", "A Turing machine view: computational functionalism applied to painting."),
        ),
        (
            Theory::Iit,
            ArtworkItem::new("Phi", "Tononi's integrated information and the irreducible whole of experience."),
        ),
        (
            Theory::Pred,
            ArtworkItem::new("Priors", "Predictive coding and free energy, after Friston."),
        ),
        (
            Theory::Gwt,
            ArtworkItem::new("Stage", "Baars' global workspace: a broadcast to the theatre of the mind."),
        ),
        (
            Theory::Enact,
            ArtworkItem::new("Dance", "Enactivism and sensorimotor loops: embodied cognition as dance."),
        ),
        (
            Theory::Pan,
            ArtworkItem::new("Clay", "Panpsychism after Strawson: living matter that can feel."),
        ),
        (
            Theory::Emerg,
            ArtworkItem::new("Flock", "Emergence and self organization produce collective intelligence."),
        ),
        (Theory::Und, ArtworkItem::new("Night", "A dream of the soul.")),
    ]
}

#[test]
fn every_tag_is_reachable() {
    let c = classifier();
    for (expected, item) in corpus() {
        let r = c.classify(&item, None);
        assert_eq!(r.primary_class, expected, "{}", item.title);
        assert_eq!(r.decision, Decision::PatternOnly);
        let want = if expected == Theory::Und {
            Confidence::Low
        } else {
            Confidence::High
        };
        assert_eq!(r.confidence, want, "{}", item.title);
    }
}

#[test]
fn cyrillic_description_is_classified() {
    let r = classifier().classify(
        &ArtworkItem::new("Рой", "Нейросеть как роевой разум: эмерджентность и самоорганизация."),
        None,
    );
    assert_eq!(r.primary_class, Theory::Emerg);
    assert!(r.meta_metaphor_detected);
}

#[test]
fn batch_matches_single_classification_and_summary_counts() {
    let c = classifier();
    let items: Vec<ArtworkItem> = corpus().into_iter().map(|(_, item)| item).collect();
    let batch = classify_batch(&c, &items, &[]);
    let single: Vec<_> = items.iter().map(|item| c.classify(item, None)).collect();
    assert_eq!(batch, single);

    let summary = BatchSummary::from_results(&batch);
    assert_eq!(summary.total, 8);
    assert_eq!(summary.class_distribution.len(), 8);
    assert!(summary.class_distribution.iter().all(|c| c.count == 1));
    let order: Vec<Theory> = summary.class_distribution.iter().map(|c| c.theory).collect();
    assert_eq!(order, Theory::ALL.to_vec());
    assert_eq!(summary.confidence_distribution[&Confidence::Low], 1);
}

#[test]
fn results_serialize_with_string_tags() {
    let (_, item) = corpus().remove(2);
    let r = classifier().classify(&item, None);
    let json = serde_json::to_value(&r).unwrap();
    assert_eq!(json["primary_class"], "PRED");
    assert_eq!(json["decision"], "pattern_only");
    assert_eq!(json["confidence"], "high");
    assert!(json["theory_scores"]["PRED"].as_f64().unwrap() > 0.0);
    assert!(json["evidence"][0]["type"].is_string());
}
