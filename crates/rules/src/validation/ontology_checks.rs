//! Validation for PatternOntology documents.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use noesis_core::{MetaphorLevel, OntologicalType, Theory};

use super::{validate_header, ValidationResult};
use crate::ontology::trigger::check_trigger;
use crate::ontology::PatternOntologyRule;

pub(crate) fn validate_ontology(rule: &PatternOntologyRule, result: &mut ValidationResult) {
    validate_header(
        &rule.api_version,
        &rule.kind,
        "PatternOntology",
        &rule.metadata.id,
        result,
    );

    let theory_tags = Theory::tags();
    let level_names = MetaphorLevel::names();
    let type_names = OntologicalType::names();

    let mut pattern_counts: BTreeMap<Theory, usize> = BTreeMap::new();
    let mut levels_seen: BTreeMap<Theory, BTreeSet<MetaphorLevel>> = BTreeMap::new();

    for (i, group) in rule.spec.theories.iter().enumerate() {
        let path = format!("spec.theories[{}]", i);
        let theory = match group.theory.parse::<Theory>() {
            Ok(t) => Some(t),
            Err(_) => {
                result.unknown_name(format!("{}.theory", path), "theory tag", &group.theory, &theory_tags);
                None
            }
        };

        let mut triggers = HashSet::new();
        for (j, def) in group.patterns.iter().enumerate() {
            let ppath = format!("{}.patterns[{}]", path, j);

            if let Err(defect) = check_trigger(&def.trigger) {
                result.error(format!("{}.trigger", ppath), defect.to_string());
            } else if !triggers.insert(def.trigger.to_lowercase()) {
                result.warn(
                    format!("{}.trigger", ppath),
                    format!("duplicate trigger '{}' within {}", def.trigger, group.theory),
                );
            }

            if !(def.weight.is_finite() && def.weight > 0.0 && def.weight <= 1.0) {
                result.error(
                    format!("{}.weight", ppath),
                    format!("weight must be in (0, 1], got {}", def.weight),
                );
            }

            let level = match def.level.parse::<MetaphorLevel>() {
                Ok(l) => Some(l),
                Err(_) => {
                    result.unknown_name(format!("{}.level", ppath), "metaphor level", &def.level, &level_names);
                    None
                }
            };

            if def.ontological_type.parse::<OntologicalType>().is_err() {
                result.unknown_name(
                    format!("{}.type", ppath),
                    "ontological type",
                    &def.ontological_type,
                    &type_names,
                );
            }

            if let Some(t) = theory {
                *pattern_counts.entry(t).or_default() += 1;
                if let Some(l) = level {
                    levels_seen.entry(t).or_default().insert(l);
                }
            }
        }
    }

    for theory in Theory::ALL {
        if pattern_counts.get(&theory).copied().unwrap_or(0) == 0 {
            result.error(
                "spec.theories",
                format!("theory {} has no patterns", theory),
            );
        } else if theory.is_substantive() {
            let seen = levels_seen.get(&theory);
            for level in MetaphorLevel::ALL {
                if !seen.is_some_and(|s| s.contains(&level)) {
                    result.warn(
                        "spec.theories",
                        format!("theory {} has no {} patterns", theory, level),
                    );
                }
            }
        }
    }

    if rule.spec.artistic_markers.is_empty() {
        result.error(
            "spec.artistic_markers",
            "artistic marker lexicon must not be empty",
        );
    }
    for (i, marker) in rule.spec.artistic_markers.iter().enumerate() {
        if let Err(defect) = check_trigger(marker) {
            result.error(format!("spec.artistic_markers[{}]", i), defect.to_string());
        }
    }

    for (i, cue) in rule.spec.negation_cues.iter().enumerate() {
        let words = cue.split_whitespace().count();
        if words != 1 {
            result.error(
                format!("spec.negation_cues[{}]", i),
                format!("negation cue must be a single word, got '{}'", cue),
            );
        }
    }
}
