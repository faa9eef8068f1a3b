//! Writing classification results and the summary report.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

use noesis_compute::BatchSummary;
use noesis_core::ClassificationResult;

pub const RESULTS_FILE: &str = "classification_results.json";
pub const SUMMARY_FILE: &str = "analysis_summary.txt";

/// `analysis_results_<YYYYmmdd_HHMMSS>` for the given instant.
pub fn default_output_dir(now: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!("analysis_results_{}", now.format("%Y%m%d_%H%M%S")))
}

/// Write both output files into `dir`, creating it if needed.
pub fn write_outputs(
    dir: &Path,
    results: &[ClassificationResult],
    summary: &BatchSummary,
    generated_at: &str,
) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let results_path = dir.join(RESULTS_FILE);
    let json = serde_json::to_string_pretty(results).context("failed to serialize results")?;
    std::fs::write(&results_path, json)
        .with_context(|| format!("failed to write {}", results_path.display()))?;

    let summary_path = dir.join(SUMMARY_FILE);
    std::fs::write(&summary_path, summary.render_text(generated_at))
        .with_context(|| format!("failed to write {}", summary_path.display()))?;

    Ok(())
}
