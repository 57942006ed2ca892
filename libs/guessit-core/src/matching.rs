//! Per-gap answer matching.
//!
//! An expected answer is one of:
//! - a plain word, compared whole-string under the case policy
//! - alternatives separated by `|` (`cat|dog`), each a small pattern
//! - a blank-allowed answer wrapped in `!!` (`!!word!!`), which also
//!   accepts an empty gap

use crate::normalize::{decode_entities, fold};
use crate::types::PlaceState;
use regex::{Regex, RegexBuilder};

/// Separates alternative answers inside one gap.
pub const ALTERNATIVE_SEPARATOR: char = '|';

/// Wraps an answer that may be left blank.
pub const BLANK_MARKER: &str = "!!";

const MAX_PATTERN_SIZE: usize = 1 << 16;

/// The text inside a blank marker, or None if `expected` is not marked.
pub fn blank_marker_content(expected: &str) -> Option<&str> {
    expected
        .strip_prefix(BLANK_MARKER)?
        .strip_suffix(BLANK_MARKER)
}

/// Whether `given` is a correct answer for a gap expecting `expected`.
///
/// Both strings are HTML-decoded first. With `disable_alternatives`
/// the `|` separator is taken literally.
pub fn is_correct(
    given: &str,
    expected: &str,
    case_sensitive: bool,
    disable_alternatives: bool,
) -> bool {
    let given = decode_entities(given);
    let expected = decode_entities(expected);

    let (body, blank_allowed) = match blank_marker_content(&expected) {
        Some(inner) => (inner, true),
        None => (&*expected, false),
    };

    if given.is_empty() {
        return blank_allowed;
    }

    if disable_alternatives {
        return literal_match(&given, body, case_sensitive);
    }

    if fold(&given, case_sensitive) == fold(body, case_sensitive) {
        return true;
    }

    if body.contains(ALTERNATIVE_SEPARATOR) {
        return alternatives_match(&given, body, case_sensitive);
    }

    false
}

/// Character-for-character comparison with no alternative splitting.
/// Only the case policy applies.
pub fn literal_match(given: &str, expected: &str, case_sensitive: bool) -> bool {
    fold(given, case_sensitive) == fold(expected, case_sensitive)
}

/// Compile the alternatives in `body` into one anchored pattern.
/// Returns None when no alternative is left after trimming.
fn alternatives_regex(body: &str, case_sensitive: bool) -> Option<Result<Regex, regex::Error>> {
    let alternatives: Vec<String> = body
        .split(ALTERNATIVE_SEPARATOR)
        .map(str::trim)
        .filter(|alt| !alt.is_empty())
        .map(|alt| format!("(?:{alt})"))
        .collect();
    if alternatives.is_empty() {
        return None;
    }

    let pattern = format!("^(?:{})$", alternatives.join("|"));
    Some(
        RegexBuilder::new(&pattern)
            .case_insensitive(!case_sensitive)
            .size_limit(MAX_PATTERN_SIZE)
            .build(),
    )
}

/// Match `given` against a `|`-separated set of alternative patterns.
///
/// The whole of `given` must match one alternative, so `cat` never
/// matches inside `catty`. A pattern that fails to compile matches
/// nothing.
fn alternatives_match(given: &str, body: &str, case_sensitive: bool) -> bool {
    match alternatives_regex(body, case_sensitive) {
        Some(Ok(re)) => re.is_match(given),
        Some(Err(err)) => {
            tracing::warn!("alternative pattern {:?} failed to compile: {}", body, err);
            false
        }
        None => false,
    }
}

/// Whether the alternatives in an expected answer compile.
/// Answers without a `|` separator are always valid.
pub fn alternatives_are_valid(expected: &str) -> bool {
    let expected = decode_entities(expected);
    let body = blank_marker_content(&expected).unwrap_or(&*expected);
    if !body.contains(ALTERNATIVE_SEPARATOR) {
        return true;
    }
    !matches!(alternatives_regex(body, true), Some(Err(_)))
}

/// Three-state feedback class for a phrase-mode gap.
///
/// A wrong answer is partially correct when its first character equals
/// the expected answer's first character, ignoring case.
pub fn gap_state(given: &str, expected: &str, case_sensitive: bool) -> PlaceState {
    if is_correct(given, expected, case_sensitive, false) {
        return PlaceState::Correct;
    }

    let given = decode_entities(given);
    let expected = decode_entities(expected);
    let body = blank_marker_content(&expected).unwrap_or(&*expected);

    match (given.chars().next(), body.chars().next()) {
        (Some(g), Some(e)) if g.to_lowercase().eq(e.to_lowercase()) => {
            PlaceState::PartiallyCorrect
        }
        _ => PlaceState::Incorrect,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match() {
        assert!(is_correct("cat", "cat", false, false));
        assert!(!is_correct("cot", "cat", false, false));
    }

    #[test]
    fn case_policy() {
        assert!(is_correct("Cat", "cat", false, false));
        assert!(!is_correct("Cat", "cat", true, false));
        assert!(is_correct("ÉTÉ", "été", false, false));
    }

    #[test]
    fn accents_are_significant() {
        assert!(!is_correct("ete", "été", false, false));
    }

    #[test]
    fn match_is_anchored() {
        assert!(!is_correct("catty", "cat", false, false));
        assert!(!is_correct("ca", "cat", false, false));
    }

    #[test]
    fn reflexive_for_unmarked_answers() {
        for expected in ["broth.", "cat|dog", "a(b|c", "Tom &amp; Jerry", "[x]"] {
            assert!(is_correct(expected, expected, false, false), "{expected}");
            assert!(is_correct(expected, expected, true, false), "{expected}");
            assert!(is_correct(expected, expected, true, true), "{expected}");
        }
    }

    #[test]
    fn alternatives() {
        assert!(is_correct("dog", "cat|dog", false, false));
        assert!(is_correct("DOG", "cat|dog", false, false));
        assert!(!is_correct("DOG", "cat|dog", true, false));
        assert!(!is_correct("doggy", "cat|dog", false, false));
        assert!(!is_correct("hotdog", "cat|dog", false, false));
    }

    #[test]
    fn alternatives_ignore_surrounding_spaces() {
        assert!(is_correct("dog", "cat | dog", false, false));
    }

    #[test]
    fn alternatives_disabled_compares_literally() {
        assert!(!is_correct("dog", "cat|dog", false, true));
        assert!(is_correct("CAT|DOG", "cat|dog", false, true));
        assert!(!is_correct("CAT|DOG", "cat|dog", true, true));
    }

    #[test]
    fn malformed_pattern_fails_closed() {
        assert!(!is_correct("a", "a(|b", false, false));
        assert!(!is_correct("anything", "(|[", false, false));
    }

    #[test]
    fn alternatives_validity() {
        assert!(alternatives_are_valid("cat"));
        assert!(alternatives_are_valid("a(b"));
        assert!(alternatives_are_valid("cat|dog"));
        assert!(alternatives_are_valid("!!colou?r|color!!"));
        assert!(!alternatives_are_valid("a(|b"));
    }

    #[test]
    fn blank_marker() {
        assert!(is_correct("", "!!answer!!", false, false));
        assert!(is_correct("", "!!answer!!", true, false));
        assert!(!is_correct("x", "!!answer!!", false, false));
        assert!(is_correct("answer", "!!answer!!", false, false));
        assert!(is_correct("", "!!!!", false, false));
    }

    #[test]
    fn empty_given_needs_marker() {
        assert!(!is_correct("", "cat", false, false));
        assert!(!is_correct("", "", false, false));
    }

    #[test]
    fn entities_decoded_before_comparison() {
        assert!(is_correct("Tom & Jerry", "Tom &amp; Jerry", false, false));
        assert!(is_correct("l&#039;eau", "l'eau", false, false));
    }

    #[test]
    fn blank_marker_content_parsing() {
        assert_eq!(blank_marker_content("!!word!!"), Some("word"));
        assert_eq!(blank_marker_content("!!!"), None);
        assert_eq!(blank_marker_content("word"), None);
    }

    #[test]
    fn gap_state_first_letter_heuristic() {
        assert_eq!(gap_state("cats", "cat", false), PlaceState::PartiallyCorrect);
        assert_eq!(gap_state("Cot", "cat", true), PlaceState::PartiallyCorrect);
        assert_eq!(gap_state("dog", "cat", false), PlaceState::Incorrect);
        assert_eq!(gap_state("", "cat", false), PlaceState::Incorrect);
        assert_eq!(gap_state("cat", "cat", false), PlaceState::Correct);
        assert_eq!(gap_state("", "!!maybe!!", false), PlaceState::Correct);
        assert_eq!(gap_state("mom", "!!maybe!!", false), PlaceState::PartiallyCorrect);
    }
}
