//! Common metadata shared across all rule kinds.

use serde::{Deserialize, Serialize};

/// Shared metadata for the ontology and scoring-policy documents.
///
/// `extends` names a parent document by ID. The loader deep-merges the
/// parent into the child before the second deserialization pass, so a rules
/// directory can override a handful of values of the shipped defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CommonMetadata {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Parent document ID for inheritance.
    #[serde(default)]
    pub extends: Option<String>,
}

pub(crate) fn default_true() -> bool {
    true
}
