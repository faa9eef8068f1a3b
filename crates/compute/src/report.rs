//! Summary statistics over a batch of classification results.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use noesis_core::{ClassificationResult, Confidence, Decision, Theory};

/// Count of one class in a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassCount {
    pub theory: Theory,
    pub count: usize,
    /// Share of the batch, 0–100.
    pub percent: f64,
}

/// Aggregate statistics for `analysis_summary.txt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    /// Most frequent first; ties in declaration order. Absent classes omitted.
    pub class_distribution: Vec<ClassCount>,
    pub confidence_distribution: BTreeMap<Confidence, usize>,
    pub decision_distribution: BTreeMap<Decision, usize>,
    pub meta_metaphor_count: usize,
    pub hybrid_count: usize,
    pub mean_evidence: f64,
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

impl BatchSummary {
    pub fn from_results(results: &[ClassificationResult]) -> Self {
        let total = results.len();

        let mut classes: BTreeMap<Theory, usize> = BTreeMap::new();
        let mut confidence_distribution = BTreeMap::new();
        let mut decision_distribution = BTreeMap::new();
        for r in results {
            *classes.entry(r.primary_class).or_default() += 1;
            *confidence_distribution.entry(r.confidence).or_default() += 1;
            *decision_distribution.entry(r.decision).or_default() += 1;
        }

        let mut class_distribution: Vec<ClassCount> = classes
            .into_iter()
            .map(|(theory, count)| ClassCount {
                theory,
                count,
                percent: percent(count, total),
            })
            .collect();
        // Stable sort keeps declaration order among equal counts.
        class_distribution.sort_by(|a, b| b.count.cmp(&a.count));

        let evidence: usize = results.iter().map(|r| r.evidence.len()).sum();

        Self {
            total,
            class_distribution,
            confidence_distribution,
            decision_distribution,
            meta_metaphor_count: results.iter().filter(|r| r.meta_metaphor_detected).count(),
            hybrid_count: results.iter().filter(|r| r.hybrid).count(),
            mean_evidence: if total == 0 {
                0.0
            } else {
                evidence as f64 / total as f64
            },
        }
    }

    pub fn meta_metaphor_rate(&self) -> f64 {
        percent(self.meta_metaphor_count, self.total)
    }

    pub fn hybrid_rate(&self) -> f64 {
        percent(self.hybrid_count, self.total)
    }

    /// Plain-text report with a header. `generated_at` is printed as given.
    pub fn render_text(&self, generated_at: &str) -> String {
        let rule = "=".repeat(60);
        format!("{rule}\nMETAPHOR ANALYSIS SUMMARY\n{rule}\nGenerated: {generated_at}\n{self}")
    }
}

/// Report body: totals, distributions and network rates.
impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let section = "-".repeat(40);
        writeln!(f, "Total items: {}", self.total)?;
        writeln!(f)?;

        writeln!(f, "CLASS DISTRIBUTION")?;
        writeln!(f, "{section}")?;
        for c in &self.class_distribution {
            writeln!(
                f,
                "  {:<6} {:<42} {:>4} ({:.1}%)",
                c.theory.tag(),
                c.theory.label(),
                c.count,
                c.percent
            )?;
        }
        writeln!(f)?;

        writeln!(f, "CONFIDENCE")?;
        writeln!(f, "{section}")?;
        for level in Confidence::ALL.iter().rev() {
            let n = self.confidence_distribution.get(level).copied().unwrap_or(0);
            writeln!(f, "  {:<8} {:>4} ({:.1}%)", level.as_str(), n, percent(n, self.total))?;
        }
        writeln!(f)?;

        writeln!(f, "DECISIONS")?;
        writeln!(f, "{section}")?;
        for (decision, n) in &self.decision_distribution {
            writeln!(f, "  {:<13} {:>4}", decision.as_str(), n)?;
        }
        writeln!(f)?;

        writeln!(f, "METAPHOR NETWORK")?;
        writeln!(f, "{section}")?;
        writeln!(
            f,
            "  Meta-metaphors detected: {} ({:.1}%)",
            self.meta_metaphor_count,
            self.meta_metaphor_rate()
        )?;
        writeln!(
            f,
            "  Hybrid classifications:  {} ({:.1}%)",
            self.hybrid_count,
            self.hybrid_rate()
        )?;
        writeln!(f, "  Mean evidence per item:  {:.2}", self.mean_evidence)
    }
}
