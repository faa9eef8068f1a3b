use serde::{Deserialize, Serialize};

use crate::theory::{MetaphorLevel, OntologicalType, Theory};

/// Byte range of a match within the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One piece of metaphor evidence found in a text.
///
/// `weight` is always in `(0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub theory: Theory,
    pub level: MetaphorLevel,
    #[serde(rename = "type")]
    pub ontological_type: OntologicalType,
    pub weight: f64,
    /// Matched text (or `"<trigger> ~ <marker>"` for synthesized meta-metaphors).
    pub trigger_text: String,
    pub span: Span,
}

impl Evidence {
    pub fn is_ontological(&self) -> bool {
        self.ontological_type == OntologicalType::Ontological
    }
}
