//! Compiled (hot-path) ontology types.

use std::collections::BTreeMap;

use regex::Regex;

use noesis_core::{MetaphorLevel, OntologicalType, Span, Theory};

/// One compiled theory pattern.
#[derive(Debug, Clone)]
pub struct MetaphorPattern {
    pub theory: Theory,
    pub trigger: String,
    pub level: MetaphorLevel,
    pub ontological_type: OntologicalType,
    pub base_weight: f64,
    pub stem: bool,
    regex: Regex,
}

impl MetaphorPattern {
    pub(crate) fn new(
        theory: Theory,
        trigger: String,
        level: MetaphorLevel,
        ontological_type: OntologicalType,
        base_weight: f64,
        stem: bool,
        regex: Regex,
    ) -> Self {
        Self {
            theory,
            trigger,
            level,
            ontological_type,
            base_weight,
            stem,
            regex,
        }
    }

    /// Non-overlapping occurrences of this pattern, left to right.
    pub fn find_spans<'a>(&'a self, text: &'a str) -> impl Iterator<Item = Span> + 'a {
        self.regex.find_iter(text).map(|m| Span::new(m.start(), m.end()))
    }
}

/// A compiled lexicon entry (artistic marker).
#[derive(Debug, Clone)]
pub struct LexiconTerm {
    pub term: String,
    regex: Regex,
}

impl LexiconTerm {
    pub(crate) fn new(term: String, regex: Regex) -> Self {
        Self { term, regex }
    }

    pub fn find_spans<'a>(&'a self, text: &'a str) -> impl Iterator<Item = Span> + 'a {
        self.regex.find_iter(text).map(|m| Span::new(m.start(), m.end()))
    }
}

/// Immutable, validated theory → pattern table.
///
/// Built once by [`PatternOntologyRule::compile`](super::PatternOntologyRule::compile)
/// and shared via `Arc`. Every theory tag has at least one pattern.
#[derive(Debug, Clone)]
pub struct PatternOntology {
    id: String,
    version: Option<String>,
    patterns: BTreeMap<Theory, Vec<MetaphorPattern>>,
    artistic_markers: Vec<LexiconTerm>,
    /// Lowercased single-word cues.
    negation_cues: Vec<String>,
}

impl PatternOntology {
    pub(crate) fn new(
        id: String,
        version: Option<String>,
        patterns: BTreeMap<Theory, Vec<MetaphorPattern>>,
        artistic_markers: Vec<LexiconTerm>,
        negation_cues: Vec<String>,
    ) -> Self {
        Self {
            id,
            version,
            patterns,
            artistic_markers,
            negation_cues,
        }
    }

    /// Source document ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Patterns of one theory, in declaration order.
    pub fn lookup(&self, theory: Theory) -> &[MetaphorPattern] {
        self.patterns.get(&theory).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All patterns, grouped by theory in declaration order.
    pub fn all_patterns(&self) -> impl Iterator<Item = &MetaphorPattern> {
        self.patterns.values().flatten()
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.values().map(Vec::len).sum()
    }

    pub fn artistic_markers(&self) -> &[LexiconTerm] {
        &self.artistic_markers
    }

    pub fn negation_cues(&self) -> &[String] {
        &self.negation_cues
    }

    pub fn is_negation_cue(&self, token: &str) -> bool {
        let lower = token.to_lowercase();
        self.negation_cues.iter().any(|c| *c == lower)
    }
}
