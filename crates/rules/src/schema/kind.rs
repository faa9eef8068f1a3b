//! Rule kind enum for two-pass deserialization dispatch.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported rule kinds for two-pass deserialization dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleKind {
    PatternOntology,
    ScoringPolicy,
}

impl RuleKind {
    pub const ALL: [RuleKind; 2] = [RuleKind::PatternOntology, RuleKind::ScoringPolicy];

    pub fn as_str(self) -> &'static str {
        match self {
            RuleKind::PatternOntology => "PatternOntology",
            RuleKind::ScoringPolicy => "ScoringPolicy",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "PatternOntology" => Ok(RuleKind::PatternOntology),
            "ScoringPolicy" => Ok(RuleKind::ScoringPolicy),
            other => {
                let names: Vec<&str> = RuleKind::ALL.iter().map(|k| k.as_str()).collect();
                match crate::validation::fuzzy::fuzzy_match(other, &names) {
                    Some(s) => Err(format!("unknown rule kind: '{}' (did you mean '{}'?)", other, s)),
                    None => Err(format!("unknown rule kind: '{}'", other)),
                }
            }
        }
    }
}
