//! PatternOntology rule kind: theory-indicative metaphor patterns, the
//! artistic-domain marker lexicon and negation cues.

mod compiled;
pub mod trigger;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use noesis_core::{MetaphorLevel, OntologicalType, Theory};

use crate::loader::{Result, RuleError};
use crate::schema::{default_true, CommonMetadata};
use crate::validation;

pub use compiled::{LexiconTerm, MetaphorPattern, PatternOntology};

// ── YAML-level types ────────────────────────────────────────────────

/// Top-level PatternOntology rule document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PatternOntologyRule {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    pub metadata: CommonMetadata,
    pub spec: PatternOntologySpec,
}

/// Specification section of a PatternOntology rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PatternOntologySpec {
    /// Free-form ontology version, recorded in logs.
    #[serde(default)]
    pub version: Option<String>,
    /// Art / process vocabulary for the meta-metaphor upgrade.
    #[serde(default)]
    pub artistic_markers: Vec<String>,
    /// Single-word cues that weaken a following match.
    #[serde(default)]
    pub negation_cues: Vec<String>,
    pub theories: Vec<TheoryPatterns>,
}

/// Patterns declared for one theory tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TheoryPatterns {
    pub theory: String,
    #[serde(default)]
    pub patterns: Vec<PatternDef>,
}

/// A single pattern as written in YAML. Names stay strings until compile
/// so validation can suggest corrections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PatternDef {
    pub trigger: String,
    pub level: String,
    #[serde(rename = "type")]
    pub ontological_type: String,
    pub weight: f64,
    #[serde(default = "default_true")]
    pub stem: bool,
}

// ── Compilation ─────────────────────────────────────────────────────

impl PatternOntologyRule {
    /// Validate and compile into an immutable lookup table.
    ///
    /// Any validation error is a [`RuleError::ConfigurationDefect`]; warnings
    /// are logged and do not block.
    pub fn compile(&self) -> Result<PatternOntology> {
        let report = validation::validate_ontology(self);
        for w in &report.warnings {
            warn!(rule_id = %self.metadata.id, path = %w.path, "{}", w.message);
        }
        if !report.valid {
            return Err(RuleError::defect(&self.metadata.id, &report));
        }

        let mut patterns: BTreeMap<Theory, Vec<MetaphorPattern>> = BTreeMap::new();
        for group in &self.spec.theories {
            let theory: Theory = group.theory.parse().map_err(RuleError::Validation)?;
            let entry = patterns.entry(theory).or_default();
            for def in &group.patterns {
                let level: MetaphorLevel = def.level.parse().map_err(RuleError::Validation)?;
                let ontological_type: OntologicalType =
                    def.ontological_type.parse().map_err(RuleError::Validation)?;
                let regex = trigger::compile_trigger(&def.trigger, def.stem)?;
                entry.push(MetaphorPattern::new(
                    theory,
                    def.trigger.clone(),
                    level,
                    ontological_type,
                    def.weight,
                    def.stem,
                    regex,
                ));
            }
        }

        let mut markers = Vec::with_capacity(self.spec.artistic_markers.len());
        for term in &self.spec.artistic_markers {
            let regex = trigger::compile_trigger(term, true)?;
            markers.push(LexiconTerm::new(term.clone(), regex));
        }

        let negation_cues = self
            .spec
            .negation_cues
            .iter()
            .map(|c| c.trim().to_lowercase())
            .collect();

        let ontology = PatternOntology::new(
            self.metadata.id.clone(),
            self.spec.version.clone(),
            patterns,
            markers,
            negation_cues,
        );
        debug!(
            rule_id = %self.metadata.id,
            patterns = ontology.pattern_count(),
            markers = ontology.artistic_markers().len(),
            "compiled pattern ontology"
        );
        Ok(ontology)
    }
}
