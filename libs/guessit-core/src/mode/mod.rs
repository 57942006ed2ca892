//! Place matchers for the two question modes.

pub mod phrase;
pub mod wordle;

use crate::types::{LetterStates, Mode, Place, PlaceState, QuestionSettings, Response};

/// Decides correctness and feedback class per place.
pub trait PlaceMatcher: Send + Sync {
    /// Matcher identifier.
    fn name(&self) -> &'static str;

    /// Whether one place's answer is correct.
    fn is_place_correct(&self, given: &str, expected: &str) -> bool;

    /// Feedback class for every place, in place order.
    fn classify(&self, response: &Response, places: &[Place]) -> Vec<PlaceState>;

    /// Close-miss markup for one place, if the mode shows any.
    fn markup(&self, _given: &str, _expected: &str) -> Option<String> {
        None
    }

    /// Per-letter states for the whole guess, if the mode has letters.
    fn letter_states(&self, _response: &Response, _places: &[Place]) -> Option<LetterStates> {
        None
    }
}

/// Get the matcher for the configured mode.
pub fn matcher_for(settings: &QuestionSettings) -> Box<dyn PlaceMatcher> {
    match settings.mode {
        Mode::Phrase => Box::new(phrase::PhraseMatcher::new(settings.case_sensitive)),
        Mode::Wordle => Box::new(wordle::WordleMatcher),
    }
}
