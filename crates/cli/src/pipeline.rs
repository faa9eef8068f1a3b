//! Collecting external judgments for a batch, ahead of classification.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use tracing::info;

use noesis_compute::Classifier;
use noesis_core::{ArtworkItem, ExternalJudgment};
use noesis_llm::{JudgmentClient, JudgmentOutcome};

/// Per-batch counts of how judgment requests ended.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct JudgmentStats {
    pub judged: usize,
    pub malformed: usize,
    pub unavailable: usize,
    /// Blank descriptions, never sent.
    pub skipped: usize,
}

/// Ask the LLM about every item, at most `concurrency` in flight, pausing
/// `delay` after each request. Results keep input order; an item whose
/// judgment is malformed or unavailable gets `None`. Blank descriptions are
/// not sent at all and also get `None`.
pub async fn collect_judgments(
    client: &JudgmentClient,
    classifier: &Classifier,
    items: &[ArtworkItem],
    concurrency: usize,
    delay: Duration,
) -> (Vec<Option<ExternalJudgment>>, JudgmentStats) {
    let total = items.len();
    let outcomes: Vec<Option<JudgmentOutcome>> = stream::iter(items.iter().enumerate())
        .map(|(i, item)| async move {
            if item.is_blank() {
                return None;
            }
            let pre = classifier.pre_analysis(&item.description);
            let outcome = client.judge(&item.description, Some(&pre)).await;
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            if (i + 1) % 10 == 0 || i + 1 == total {
                info!(done = i + 1, total, "judgments requested");
            }
            Some(outcome)
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let mut stats = JudgmentStats::default();
    let judgments: Vec<Option<ExternalJudgment>> = outcomes
        .iter()
        .map(|outcome| {
            let Some(outcome) = outcome else {
                stats.skipped += 1;
                return None;
            };
            match outcome {
                JudgmentOutcome::Judged(_) => stats.judged += 1,
                JudgmentOutcome::Malformed(_) => stats.malformed += 1,
                JudgmentOutcome::Unavailable(_) => stats.unavailable += 1,
            }
            outcome.judgment()
        })
        .collect();
    (judgments, stats)
}
