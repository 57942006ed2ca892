//! Wordle mode: guess a single word, one letter per place.
//!
//! Letters are classified in two passes. Exact positions are taken
//! first; each remaining guessed letter then claims one unused
//! occurrence of itself in the answer, if any is left. A letter is
//! therefore never marked more often than it occurs in the answer.

use super::PlaceMatcher;
use crate::normalize::decode_entities;
use crate::types::{LetterState, LetterStates, Place, PlaceState, Response};

#[derive(Debug, Clone, Copy, Default)]
pub struct WordleMatcher;

/// Classify each letter of `given` against `expected`.
///
/// Only positions within the shorter of the two strings are classified,
/// so the result has `min(len(expected), len(given))` entries.
pub fn classify(expected: &str, given: &str) -> LetterStates {
    let expected: Vec<Option<char>> = expected.chars().map(Some).collect();
    let given: Vec<Option<char>> = given.chars().map(Some).collect();
    classify_slots(&expected, &given)
}

/// Two-pass classification over letter slots. An empty slot (`None`)
/// is never exact and never claims or offers a letter.
pub fn classify_slots(expected: &[Option<char>], given: &[Option<char>]) -> LetterStates {
    let len = expected.len().min(given.len());
    let mut states = vec![LetterState::Absent; len];
    let mut used = vec![false; expected.len()];

    for i in 0..len {
        if given[i].is_some() && given[i] == expected[i] {
            states[i] = LetterState::Exact;
            used[i] = true;
        }
    }

    for i in 0..len {
        if states[i] == LetterState::Exact {
            continue;
        }
        let Some(letter) = given[i] else {
            continue;
        };
        if let Some(j) = (0..expected.len()).find(|&j| !used[j] && expected[j] == Some(letter)) {
            used[j] = true;
            states[i] = LetterState::Misplaced;
        }
    }

    LetterStates(states)
}

/// The letter in a place's text, uppercased. A slot holding more or
/// less than one character has no letter.
fn slot_letter(text: &str) -> Option<char> {
    let mut chars = text.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    Some(c.to_uppercase().next().unwrap_or(c))
}

impl PlaceMatcher for WordleMatcher {
    fn name(&self) -> &'static str {
        "wordle"
    }

    /// Same rule as the letter states: one letter, exact, any case.
    fn is_place_correct(&self, given: &str, expected: &str) -> bool {
        match slot_letter(&decode_entities(given)) {
            Some(letter) => Some(letter) == slot_letter(&decode_entities(expected)),
            None => false,
        }
    }

    fn classify(&self, response: &Response, places: &[Place]) -> Vec<PlaceState> {
        let states = self
            .letter_states(response, places)
            .unwrap_or_default();
        places
            .iter()
            .enumerate()
            .map(|(i, _)| {
                states
                    .0
                    .get(i)
                    .copied()
                    .map(PlaceState::from)
                    .unwrap_or(PlaceState::Incorrect)
            })
            .collect()
    }

    fn letter_states(&self, response: &Response, places: &[Place]) -> Option<LetterStates> {
        let expected: Vec<Option<char>> = places
            .iter()
            .map(|p| slot_letter(&decode_entities(&p.answer)))
            .collect();
        let given: Vec<Option<char>> = places
            .iter()
            .map(|p| slot_letter(&decode_entities(response.get(p.index))))
            .collect();
        Some(classify_slots(&expected, &given))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PlaceIndex;
    use pretty_assertions::assert_eq;

    fn codes(expected: &str, given: &str) -> String {
        classify(expected, given).to_code_string()
    }

    fn letters(word: &str) -> Vec<Place> {
        word.chars()
            .enumerate()
            .map(|(i, c)| Place {
                index: PlaceIndex::new(i as u32 + 1).unwrap(),
                answer: c.to_string(),
            })
            .collect()
    }

    fn guess(word: &str) -> Response {
        word.chars()
            .enumerate()
            .filter(|(_, c)| *c != '_')
            .map(|(i, c)| (PlaceIndex::new(i as u32 + 1).unwrap(), c.to_string()))
            .collect()
    }

    #[test]
    fn identical_is_all_exact() {
        assert_eq!(codes("PIZZA", "PIZZA"), "22222");
        assert!(classify("PIZZA", "PIZZA").all_exact());
    }

    #[test]
    fn anagram_has_no_absent_letters() {
        assert_eq!(codes("ABCDE", "EDCBA"), "11211");
        assert_eq!(codes("ABCD", "DCBA"), "1111");
    }

    #[test]
    fn wrong_single_letter_is_absent() {
        assert_eq!(codes("PIZZA", "PUZZA"), "20222");
    }

    #[test]
    fn multiplicity_is_respected() {
        // only one L in the answer: the exact one takes it
        assert_eq!(codes("WORLD", "LLLLL"), "00020");
        // two Zs in the answer, three in the guess: the middle one is exact
        assert_eq!(codes("PIZZA", "ZZZPI"), "10211");
        // repeated letter in the guess, single in the answer
        assert_eq!(codes("CRANE", "EERIE"), "00102");
    }

    #[test]
    fn length_mismatch_compares_shorter() {
        assert_eq!(codes("PIZZA", "PIZ"), "222");
        assert_eq!(codes("PIZ", "PIZZA"), "222");
        assert_eq!(codes("", "ABC"), "");
    }

    #[test]
    fn misplaced_may_claim_tail_letters() {
        assert_eq!(codes("ABCDE", "E"), "1");
    }

    #[test]
    fn matcher_uses_place_letters() {
        let places = letters("PIZZA");
        let states = WordleMatcher
            .letter_states(&guess("pazzi"), &places)
            .unwrap();
        assert_eq!(states.to_code_string(), "21221");
    }

    #[test]
    fn empty_slots_are_absent() {
        let places = letters("PIZZA");
        let states = WordleMatcher.classify(&guess("P__ZA"), &places);
        assert_eq!(
            states,
            vec![
                PlaceState::Correct,
                PlaceState::Incorrect,
                PlaceState::Incorrect,
                PlaceState::Correct,
                PlaceState::Correct,
            ]
        );
    }

    #[test]
    fn multi_letter_slot_is_absent() {
        let places = letters("PIZZA");
        let mut response = guess("_IZZA");
        response.insert(PlaceIndex::new(1).unwrap(), "PX");

        let states = WordleMatcher.letter_states(&response, &places).unwrap();
        assert_eq!(states.to_code_string(), "02222");
        assert!(!WordleMatcher.is_place_correct("PX", "P"));
        assert_eq!(
            WordleMatcher.classify(&response, &places)[0],
            PlaceState::Incorrect
        );
    }

    #[test]
    fn empty_expected_slot_keeps_alignment() {
        let expected = [Some('A'), None, Some('C')];
        let given = [Some('A'), Some('B'), Some('C')];
        assert_eq!(classify_slots(&expected, &given).to_code_string(), "202");

        let mut places = letters("ABC");
        places[1].answer = String::new();
        let states = WordleMatcher.letter_states(&guess("ABC"), &places).unwrap();
        assert_eq!(states.to_code_string(), "202");
    }

    #[test]
    fn place_correct_ignores_case() {
        assert!(WordleMatcher.is_place_correct("p", "P"));
        assert!(!WordleMatcher.is_place_correct("", "P"));
        assert!(!WordleMatcher.is_place_correct("Q", "P"));
        assert_eq!(WordleMatcher.markup("Q", "P"), None);
    }
}
