use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Consciousness theory tag.
///
/// Declaration order is the fixed priority order used for final tie-breaks,
/// so `Ord` on this type is meaningful and must not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Theory {
    /// Computational functionalism.
    #[serde(rename = "COMP")]
    Comp,
    /// Integrated information theory.
    #[serde(rename = "IIT")]
    Iit,
    /// Predictive processing / free energy.
    #[serde(rename = "PRED")]
    Pred,
    /// Global workspace theory.
    #[serde(rename = "GWT")]
    Gwt,
    /// Enactivism / embodied cognition.
    #[serde(rename = "ENACT")]
    Enact,
    /// Panpsychism.
    #[serde(rename = "PAN")]
    Pan,
    /// Emergentism.
    #[serde(rename = "EMERG")]
    Emerg,
    /// No clear theoretical signal.
    #[serde(rename = "UND")]
    Und,
}

impl Theory {
    /// All tags in declaration order.
    pub const ALL: [Theory; 8] = [
        Theory::Comp,
        Theory::Iit,
        Theory::Pred,
        Theory::Gwt,
        Theory::Enact,
        Theory::Pan,
        Theory::Emerg,
        Theory::Und,
    ];

    /// The seven substantive theories (everything but `Und`).
    pub const SUBSTANTIVE: [Theory; 7] = [
        Theory::Comp,
        Theory::Iit,
        Theory::Pred,
        Theory::Gwt,
        Theory::Enact,
        Theory::Pan,
        Theory::Emerg,
    ];

    /// Short tag as used in rule files, prompts and reports.
    pub fn tag(self) -> &'static str {
        match self {
            Theory::Comp => "COMP",
            Theory::Iit => "IIT",
            Theory::Pred => "PRED",
            Theory::Gwt => "GWT",
            Theory::Enact => "ENACT",
            Theory::Pan => "PAN",
            Theory::Emerg => "EMERG",
            Theory::Und => "UND",
        }
    }

    /// Human-readable theory name.
    pub fn label(self) -> &'static str {
        match self {
            Theory::Comp => "Computational Functionalism",
            Theory::Iit => "Integrated Information Theory",
            Theory::Pred => "Predictive Processing / Free Energy",
            Theory::Gwt => "Global Workspace Theory",
            Theory::Enact => "Enactivism",
            Theory::Pan => "Panpsychism",
            Theory::Emerg => "Emergentism",
            Theory::Und => "Undetermined",
        }
    }

    pub fn is_substantive(self) -> bool {
        self != Theory::Und
    }

    /// Every accepted tag spelling, for "did you mean" suggestions.
    pub fn tags() -> Vec<&'static str> {
        Theory::ALL.iter().map(|t| t.tag()).collect()
    }
}

impl fmt::Display for Theory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Theory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "COMP" => Ok(Theory::Comp),
            "IIT" => Ok(Theory::Iit),
            "PRED" => Ok(Theory::Pred),
            "GWT" => Ok(Theory::Gwt),
            "ENACT" => Ok(Theory::Enact),
            "PAN" => Ok(Theory::Pan),
            "EMERG" => Ok(Theory::Emerg),
            "UND" | "UNDETERMINED" => Ok(Theory::Und),
            other => Err(format!("unknown theory tag: '{}'", other)),
        }
    }
}

// ── Metaphor level ──────────────────────────────────────────────────

/// Depth of metaphorical transformation of a theory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetaphorLevel {
    /// Direct theory term or author name.
    ExplicitTerm,
    /// Metaphor from the scientific discourse ("brain as computer").
    ScientificMetaphor,
    /// Artistic re-metaphorization of a scientific metaphor.
    MetaMetaphor,
    /// Metaphor embedded within another metaphor.
    NestedMetaphor,
}

impl MetaphorLevel {
    pub const ALL: [MetaphorLevel; 4] = [
        MetaphorLevel::ExplicitTerm,
        MetaphorLevel::ScientificMetaphor,
        MetaphorLevel::MetaMetaphor,
        MetaphorLevel::NestedMetaphor,
    ];

    /// Depth rank used for dominance tie-breaks:
    /// meta > nested > scientific > explicit.
    pub fn depth_rank(self) -> u8 {
        match self {
            MetaphorLevel::ExplicitTerm => 0,
            MetaphorLevel::ScientificMetaphor => 1,
            MetaphorLevel::NestedMetaphor => 2,
            MetaphorLevel::MetaMetaphor => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MetaphorLevel::ExplicitTerm => "explicit_term",
            MetaphorLevel::ScientificMetaphor => "scientific_metaphor",
            MetaphorLevel::MetaMetaphor => "meta_metaphor",
            MetaphorLevel::NestedMetaphor => "nested_metaphor",
        }
    }

    pub fn names() -> Vec<&'static str> {
        MetaphorLevel::ALL.iter().map(|l| l.as_str()).collect()
    }
}

impl fmt::Display for MetaphorLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MetaphorLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "explicit_term" => Ok(MetaphorLevel::ExplicitTerm),
            "scientific_metaphor" => Ok(MetaphorLevel::ScientificMetaphor),
            "meta_metaphor" => Ok(MetaphorLevel::MetaMetaphor),
            "nested_metaphor" => Ok(MetaphorLevel::NestedMetaphor),
            other => Err(format!("unknown metaphor level: '{}'", other)),
        }
    }
}

// ── Ontological type ────────────────────────────────────────────────

/// What a metaphor asserts: the nature of mind, or mere framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OntologicalType {
    Ontological,
    Structural,
    Orientational,
    Decorative,
}

impl OntologicalType {
    pub const ALL: [OntologicalType; 4] = [
        OntologicalType::Ontological,
        OntologicalType::Structural,
        OntologicalType::Orientational,
        OntologicalType::Decorative,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OntologicalType::Ontological => "ontological",
            OntologicalType::Structural => "structural",
            OntologicalType::Orientational => "orientational",
            OntologicalType::Decorative => "decorative",
        }
    }

    pub fn names() -> Vec<&'static str> {
        OntologicalType::ALL.iter().map(|t| t.as_str()).collect()
    }
}

impl fmt::Display for OntologicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OntologicalType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ontological" => Ok(OntologicalType::Ontological),
            "structural" => Ok(OntologicalType::Structural),
            "orientational" => Ok(OntologicalType::Orientational),
            "decorative" => Ok(OntologicalType::Decorative),
            other => Err(format!("unknown metaphor type: '{}'", other)),
        }
    }
}

// ── Confidence ──────────────────────────────────────────────────────

/// Qualitative confidence label, ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub const ALL: [Confidence; 3] = [Confidence::Low, Confidence::Medium, Confidence::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Confidence {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Confidence::Low),
            "medium" => Ok(Confidence::Medium),
            "high" => Ok(Confidence::High),
            other => Err(format!("unknown confidence label: '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theory_tags_round_trip() {
        for theory in Theory::ALL {
            assert_eq!(theory.tag().parse::<Theory>().unwrap(), theory);
        }
    }

    #[test]
    fn theory_parse_is_case_insensitive() {
        assert_eq!("pred".parse::<Theory>().unwrap(), Theory::Pred);
        assert_eq!(" Emerg ".parse::<Theory>().unwrap(), Theory::Emerg);
        assert_eq!("undetermined".parse::<Theory>().unwrap(), Theory::Und);
        assert!("QUANTUM".parse::<Theory>().is_err());
    }

    #[test]
    fn theory_serializes_as_tag() {
        let json = serde_json::to_string(&Theory::Enact).unwrap();
        assert_eq!(json, "\"ENACT\"");
        let back: Theory = serde_json::from_str("\"GWT\"").unwrap();
        assert_eq!(back, Theory::Gwt);
    }

    #[test]
    fn declaration_order_is_priority_order() {
        assert!(Theory::Comp < Theory::Iit);
        assert!(Theory::Emerg < Theory::Und);
        assert_eq!(Theory::SUBSTANTIVE.len(), 7);
        assert!(!Theory::SUBSTANTIVE.contains(&Theory::Und));
    }

    #[test]
    fn level_depth_rank_order() {
        assert!(MetaphorLevel::MetaMetaphor.depth_rank() > MetaphorLevel::NestedMetaphor.depth_rank());
        assert!(
            MetaphorLevel::NestedMetaphor.depth_rank()
                > MetaphorLevel::ScientificMetaphor.depth_rank()
        );
        assert!(
            MetaphorLevel::ScientificMetaphor.depth_rank()
                > MetaphorLevel::ExplicitTerm.depth_rank()
        );
    }

    #[test]
    fn level_and_type_names_parse() {
        for level in MetaphorLevel::ALL {
            assert_eq!(level.as_str().parse::<MetaphorLevel>().unwrap(), level);
        }
        for kind in OntologicalType::ALL {
            assert_eq!(kind.as_str().parse::<OntologicalType>().unwrap(), kind);
        }
    }

    #[test]
    fn confidence_ordering() {
        assert!(Confidence::Low < Confidence::Medium);
        assert!(Confidence::Medium < Confidence::High);
        assert_eq!(Confidence::High.max(Confidence::Low), Confidence::High);
        assert_eq!("HIGH".parse::<Confidence>().unwrap(), Confidence::High);
    }
}
