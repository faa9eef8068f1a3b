//! Error types and load result structures for the rule loader.

use std::path::PathBuf;

use super::extends::ExtendsError;
use crate::schema::RuleKind;
use crate::validation::ValidationResult;

/// Errors that can occur during rule loading and compilation.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// Filesystem I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse/deserialization error.
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A document that cannot be interpreted (missing id, unknown kind or name).
    #[error("Validation error: {0}")]
    Validation(String),

    /// An `extends` chain could not be resolved.
    #[error("Extends error: {0}")]
    Extends(#[from] ExtendsError),

    /// A trigger phrase did not compile to a regex.
    #[error("Invalid trigger pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Ontology or policy failed validation. Fatal at startup.
    #[error("Configuration defect in '{rule_id}': {}", .errors.join("; "))]
    ConfigurationDefect { rule_id: String, errors: Vec<String> },

    /// More than one enabled document of a kind that must be unique.
    #[error("Ambiguous {kind} documents: {}", .ids.join(", "))]
    Ambiguous { kind: RuleKind, ids: Vec<String> },
}

impl RuleError {
    pub(crate) fn defect(rule_id: &str, report: &ValidationResult) -> Self {
        RuleError::ConfigurationDefect {
            rule_id: rule_id.to_string(),
            errors: report.errors.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// Result alias for rule operations.
pub type Result<T> = std::result::Result<T, RuleError>;

/// Outcome of loading a single rule file.
#[derive(Debug)]
pub struct LoadResult {
    /// Path to the file that was loaded.
    pub path: PathBuf,
    /// Status of the load attempt.
    pub status: LoadStatus,
}

/// Status of a single file load attempt.
#[derive(Debug)]
pub enum LoadStatus {
    /// Rule was successfully loaded.
    Loaded { rule_id: String },
    /// File was skipped (dotfile, non-YAML, disabled).
    Skipped { reason: String },
    /// Parse or validation error occurred.
    Failed { error: String },
}
