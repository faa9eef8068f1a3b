//! Trigger phrase → regex translation.
//!
//! A trigger is a whitespace-separated list of words. Every word must start
//! at a word boundary; with stemming on, any word characters may follow
//! (`predict` matches `predicts`, `prediction`, `предсказ` matches
//! `предсказывает`). A literal `...` word is a gap of up to
//! [`MAX_GAP_WORDS`] arbitrary words. Matching is case-insensitive and
//! Unicode-aware.

use regex::{Regex, RegexBuilder};

/// Gap token inside a trigger phrase.
pub const GAP_TOKEN: &str = "...";

/// Maximum words a gap may skip.
pub const MAX_GAP_WORDS: usize = 3;

/// Structural problem with a trigger phrase, reported by validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerDefect {
    Empty,
    /// Starts or ends with a gap, or has two gaps in a row.
    DanglingGap,
    /// A word does not start with a word character, so it can never sit on a word boundary.
    NonWordStart(String),
}

impl std::fmt::Display for TriggerDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriggerDefect::Empty => write!(f, "trigger must not be empty"),
            TriggerDefect::DanglingGap => {
                write!(f, "'{}' must sit between two words", GAP_TOKEN)
            }
            TriggerDefect::NonWordStart(w) => {
                write!(f, "word '{}' must start with a letter or digit", w)
            }
        }
    }
}

/// Check a trigger phrase for structural defects.
pub fn check_trigger(trigger: &str) -> Result<(), TriggerDefect> {
    let words: Vec<&str> = trigger.split_whitespace().collect();
    if words.is_empty() {
        return Err(TriggerDefect::Empty);
    }
    let mut prev_gap = true;
    for word in &words {
        if *word == GAP_TOKEN {
            if prev_gap {
                return Err(TriggerDefect::DanglingGap);
            }
            prev_gap = true;
            continue;
        }
        if !word.chars().next().is_some_and(is_word_char) {
            return Err(TriggerDefect::NonWordStart(word.to_string()));
        }
        prev_gap = false;
    }
    if prev_gap {
        return Err(TriggerDefect::DanglingGap);
    }
    Ok(())
}

/// Build the regex source for a trigger phrase. Call [`check_trigger`] first.
pub fn trigger_pattern(trigger: &str, stem: bool) -> String {
    let mut pattern = String::from(r"(?i)");
    let mut first = true;
    let mut gap = false;
    for word in trigger.split_whitespace() {
        if word == GAP_TOKEN {
            gap = true;
            continue;
        }
        if !first {
            if gap {
                pattern.push_str(&format!(r"\W+(?:\w+\W+){{0,{}}}", MAX_GAP_WORDS));
            } else {
                pattern.push_str(r"\W+");
            }
        }
        pattern.push_str(r"\b");
        pattern.push_str(&regex::escape(word));
        if stem {
            pattern.push_str(r"\w*");
        } else if word.chars().last().is_some_and(is_word_char) {
            pattern.push_str(r"\b");
        }
        first = false;
        gap = false;
    }
    pattern
}

/// Compile a trigger phrase into a case-insensitive Unicode regex.
pub fn compile_trigger(trigger: &str, stem: bool) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&trigger_pattern(trigger, stem))
        .unicode(true)
        .build()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(trigger: &str, stem: bool, text: &str) -> bool {
        compile_trigger(trigger, stem).unwrap().is_match(text)
    }

    #[test]
    fn stem_matches_morphological_variants() {
        assert!(matches("predict", true, "the brain predicts"));
        assert!(matches("predict", true, "a prediction"));
        assert!(!matches("predict", true, "unpredictable"));
    }

    #[test]
    fn exact_word_requires_trailing_boundary() {
        assert!(matches("phi", false, "measured by Phi."));
        assert!(!matches("phi", false, "philosophy"));
    }

    #[test]
    fn case_insensitive() {
        assert!(matches("global workspace", true, "A GLOBAL Workspace"));
    }

    #[test]
    fn gap_allows_up_to_three_words() {
        assert!(matches("brain ... predict", true, "brain predicts"));
        assert!(matches("brain ... predict", true, "the brain constantly and actively predicts"));
        assert!(!matches(
            "brain ... predict",
            true,
            "brain is one two three four predicts"
        ));
    }

    #[test]
    fn cyrillic_stem_and_case() {
        assert!(matches("мозг ... предсказ", true, "Мозг постоянно предсказывает мир"));
        assert!(matches("эмерджентн", true, "ЭМЕРДЖЕНТНОЕ поведение"));
    }

    #[test]
    fn punctuation_between_words() {
        assert!(matches("self organi", true, "self-organizing swarm"));
    }

    #[test]
    fn regex_metacharacters_escaped() {
        assert!(compile_trigger("c++ (model)", true).is_ok());
    }

    #[test]
    fn check_trigger_defects() {
        assert_eq!(check_trigger("   "), Err(TriggerDefect::Empty));
        assert_eq!(check_trigger("... brain"), Err(TriggerDefect::DanglingGap));
        assert_eq!(check_trigger("brain ..."), Err(TriggerDefect::DanglingGap));
        assert_eq!(check_trigger("brain ... ... mind"), Err(TriggerDefect::DanglingGap));
        assert_eq!(
            check_trigger("brain -mind"),
            Err(TriggerDefect::NonWordStart("-mind".into()))
        );
        assert!(check_trigger("brain ... predict").is_ok());
    }
}
