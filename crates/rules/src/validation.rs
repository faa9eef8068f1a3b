//! Rule validation with structured errors and suggestions.
//!
//! Returns a [`ValidationResult`] with errors (block loading) and warnings
//! (advisory). The loader turns errors into
//! [`RuleError::ConfigurationDefect`](crate::loader::RuleError::ConfigurationDefect).

mod ontology_checks;
mod policy_checks;

pub mod fuzzy;

use serde::{Deserialize, Serialize};

use crate::ontology::PatternOntologyRule;
use crate::policy::ScoringPolicyRule;
use crate::schema::{RuleDocument, RuleEnvelope, API_VERSION};

// ── Result types ────────────────────────────────────────────────────

/// Overall validation outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

/// A blocking validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Path-like location, e.g. `"spec.theories[2].patterns[0].weight"`.
    pub path: String,
    pub message: String,
    /// Optional "Did you mean …?" suggestion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// A non-blocking advisory warning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)?;
        } else {
            write!(f, "{}: {}", self.path, self.message)?;
        }
        if let Some(s) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", s)?;
        }
        Ok(())
    }
}

impl ValidationResult {
    pub(crate) fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(ValidationError {
            path: path.into(),
            message: message.into(),
            suggestion: None,
        });
    }

    pub(crate) fn error_with_suggestion(
        &mut self,
        path: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) {
        self.valid = false;
        self.errors.push(ValidationError {
            path: path.into(),
            message: message.into(),
            suggestion: Some(suggestion.into()),
        });
    }

    pub(crate) fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationWarning {
            path: path.into(),
            message: message.into(),
        });
    }

    /// Report an unknown name, with a suggestion when one is close enough.
    pub(crate) fn unknown_name(
        &mut self,
        path: impl Into<String>,
        what: &str,
        value: &str,
        candidates: &[&str],
    ) {
        let message = format!("unknown {} '{}'", what, value);
        match fuzzy::fuzzy_match(value, candidates) {
            Some(s) => self.error_with_suggestion(path, message, s),
            None => self.error(path, format!("{} (expected one of: {})", message, candidates.join(", "))),
        }
    }
}

// ── Common metadata validation ──────────────────────────────────────

pub(crate) fn validate_header(
    api_version: &str,
    kind: &str,
    expected_kind: &str,
    id: &str,
    result: &mut ValidationResult,
) {
    if api_version != API_VERSION {
        result.error(
            "apiVersion",
            format!("apiVersion must be '{}', got '{}'", API_VERSION, api_version),
        );
    }
    if kind != expected_kind {
        result.error(
            "kind",
            format!("kind must be '{}', got '{}'", expected_kind, kind),
        );
    }
    if !fuzzy::is_kebab_case(id) {
        result.error(
            "metadata.id",
            format!(
                "id must be kebab-case (lowercase alphanumeric + hyphens), got '{}'",
                id
            ),
        );
    }
}

// ── Public API ──────────────────────────────────────────────────────

/// Validate a parsed [`PatternOntologyRule`].
pub fn validate_ontology(rule: &PatternOntologyRule) -> ValidationResult {
    let mut result = ValidationResult::new();
    ontology_checks::validate_ontology(rule, &mut result);
    result
}

/// Validate a parsed [`ScoringPolicyRule`].
pub fn validate_policy(rule: &ScoringPolicyRule) -> ValidationResult {
    let mut result = ValidationResult::new();
    policy_checks::validate_policy(rule, &mut result);
    result
}

/// Validate any [`RuleDocument`] variant, dispatching to the appropriate validator.
pub fn validate_document(doc: &RuleDocument) -> ValidationResult {
    match doc {
        RuleDocument::PatternOntology(rule) => validate_ontology(rule),
        RuleDocument::ScoringPolicy(rule) => validate_policy(rule),
    }
}

/// Parse raw YAML and validate. Returns parse errors merged with validation errors.
///
/// `extends` is not resolved here, so a partial child document may report
/// errors that vanish once it is merged with its parent.
pub fn validate_yaml(yaml: &str) -> ValidationResult {
    let parsed = serde_yaml::from_str::<RuleEnvelope>(yaml)
        .map_err(|e| format!("YAML parse error: {e}"))
        .and_then(|env| env.parse_full());
    match parsed {
        Ok(doc) => validate_document(&doc),
        Err(e) => {
            let mut result = ValidationResult::new();
            result.error("", e);
            result
        }
    }
}
