//! Parallel classification of many items.

use rayon::prelude::*;
use tracing::info;

use noesis_core::{ArtworkItem, ClassificationResult, ExternalJudgment};

use crate::classifier::Classifier;

/// Classify `items` in parallel. `judgments[i]` belongs to `items[i]`; a
/// missing entry counts as no judgment. Output order equals input order.
pub fn classify_batch(
    classifier: &Classifier,
    items: &[ArtworkItem],
    judgments: &[Option<ExternalJudgment>],
) -> Vec<ClassificationResult> {
    let results: Vec<ClassificationResult> = items
        .par_iter()
        .enumerate()
        .map(|(i, item)| classifier.classify(item, judgments.get(i).and_then(Option::as_ref)))
        .collect();

    info!(
        items = results.len(),
        with_judgment = judgments.iter().filter(|j| j.is_some()).count(),
        "batch classified"
    );
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use noesis_core::{Confidence, Decision, Theory};
    use noesis_rules::RuleSet;

    fn items() -> Vec<ArtworkItem> {
        vec![
            ArtworkItem::new("one", "A global workspace broadcast."),
            ArtworkItem::new("two", ""),
            ArtworkItem::new("three", "Panpsychism: living matter feels."),
            ArtworkItem::new("four", "Emergent swarm mind from simple rules."),
        ]
    }

    #[test]
    fn preserves_input_order() {
        let classifier = Classifier::new(&RuleSet::embedded().unwrap());
        let results = classify_batch(&classifier, &items(), &[]);
        let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["one", "two", "three", "four"]);
        assert_eq!(results[0].primary_class, Theory::Gwt);
        assert_eq!(results[1].primary_class, Theory::Und);
        assert_eq!(results[2].primary_class, Theory::Pan);
        assert_eq!(results[3].primary_class, Theory::Emerg);
    }

    #[test]
    fn judgments_align_by_index() {
        let classifier = Classifier::new(&RuleSet::embedded().unwrap());
        let judgments = vec![
            None,
            Some(ExternalJudgment {
                primary: Theory::Iit,
                secondary: None,
                confidence: Confidence::High,
            }),
        ];
        let results = classify_batch(&classifier, &items(), &judgments);
        assert_eq!(results[0].decision, Decision::PatternOnly);
        assert_eq!(results[1].decision, Decision::Disagreed);
        assert_eq!(results[1].primary_class, Theory::Iit);
        assert_eq!(results[3].decision, Decision::PatternOnly);
    }

    #[test]
    fn matches_sequential_classification() {
        let classifier = Classifier::new(&RuleSet::embedded().unwrap());
        let items = items();
        let parallel = classify_batch(&classifier, &items, &[]);
        let sequential: Vec<_> = items.iter().map(|i| classifier.classify(i, None)).collect();
        assert_eq!(parallel, sequential);
    }
}
