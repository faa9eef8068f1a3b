//! Name suggestions for "did you mean" messages, and ID format checks.

/// Closest candidate by case-insensitive edit distance, if it is within half
/// the length of the longer string. Ties go to the earlier candidate.
pub(crate) fn fuzzy_match<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    let needle = input.to_lowercase();
    let (best, distance) = candidates
        .iter()
        .map(|&c| (c, levenshtein(&needle, &c.to_lowercase())))
        .min_by_key(|&(_, d)| d)?;
    let longest = input.chars().count().max(best.chars().count());
    (distance <= longest / 2).then_some(best)
}

/// Edit distance over chars, so Cyrillic names count one per letter.
pub(crate) fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    // row[j] = distance between the prefix of `a` seen so far and b[..j]
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitute = diagonal + usize::from(ca != cb);
            diagonal = row[j + 1];
            row[j + 1] = substitute.min(row[j] + 1).min(diagonal + 1);
        }
    }
    row[b.len()]
}

/// `^[a-z0-9]+(-[a-z0-9]+)*$`
pub(crate) fn is_kebab_case(s: &str) -> bool {
    !s.is_empty()
        && s.split('-').all(|part| {
            !part.is_empty() && part.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVELS: &[&str] = &[
        "explicit_term",
        "scientific_metaphor",
        "meta_metaphor",
        "nested_metaphor",
    ];

    const TAGS: &[&str] = &["COMP", "IIT", "PRED", "GWT", "ENACT", "PAN", "EMERG", "UND"];

    #[test]
    fn levenshtein_basic() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", "abc"), 0);
        assert_eq!(levenshtein("мозг", "мозги"), 1);
    }

    #[test]
    fn fuzzy_match_finds_close() {
        assert_eq!(fuzzy_match("scientific_metafor", LEVELS), Some("scientific_metaphor"));
        assert_eq!(fuzzy_match("EMRG", TAGS), Some("EMERG"));
        assert_eq!(fuzzy_match("enactiv", TAGS), Some("ENACT"));
    }

    #[test]
    fn fuzzy_match_rejects_distant() {
        assert_eq!(fuzzy_match("zzzzzzzzzzzzz", LEVELS), None);
    }

    #[test]
    fn kebab_case() {
        assert!(is_kebab_case("pattern-ontology-default"));
        assert!(!is_kebab_case("Pattern_Ontology"));
        assert!(!is_kebab_case("trailing-"));
    }
}
