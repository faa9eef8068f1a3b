//! Metaphor extraction, network aggregation and classification.
//!
//! Everything here is synchronous and free of I/O; the compiled rule set is
//! shared read-only, so any number of threads may classify at once.

pub mod aggregator;
pub mod batch;
pub mod classifier;
pub mod extractor;
pub mod report;
pub mod tokens;

pub use aggregator::{aggregate, NetworkSummary, TheoryCluster};
pub use batch::classify_batch;
pub use classifier::{Analysis, Classifier};
pub use extractor::MetaphorExtractor;
pub use report::{BatchSummary, ClassCount};
