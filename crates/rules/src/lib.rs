//! Metaphor pattern ontology and scoring policy as YAML rule documents.
//!
//! This crate provides:
//! - YAML rule definitions (`PatternOntology`, `ScoringPolicy`) with serde deserialization
//! - Filesystem loader with `extends` inheritance over the embedded defaults
//! - Validation with "did you mean" suggestions
//! - Compilation into an immutable, regex-backed lookup table

pub mod loader;
pub mod ontology;
pub mod policy;
pub mod ruleset;
pub mod schema;
pub mod validation;

pub use loader::RuleError;
pub use ontology::{LexiconTerm, MetaphorPattern, PatternOntology};
pub use policy::ScoringPolicy;
pub use ruleset::RuleSet;
