//! Phrase mode: one gap per word.

use super::PlaceMatcher;
use crate::markup;
use crate::matching::{self, blank_marker_content};
use crate::normalize::decode_entities;
use crate::types::{Place, PlaceState, Response};

#[derive(Debug, Clone, Default)]
pub struct PhraseMatcher {
    pub case_sensitive: bool,
}

impl PhraseMatcher {
    pub fn new(case_sensitive: bool) -> Self {
        Self { case_sensitive }
    }
}

impl PlaceMatcher for PhraseMatcher {
    fn name(&self) -> &'static str {
        "phrase"
    }

    fn is_place_correct(&self, given: &str, expected: &str) -> bool {
        matching::is_correct(given, expected, self.case_sensitive, false)
    }

    fn classify(&self, response: &Response, places: &[Place]) -> Vec<PlaceState> {
        places
            .iter()
            .map(|p| matching::gap_state(response.get(p.index), &p.answer, self.case_sensitive))
            .collect()
    }

    fn markup(&self, given: &str, expected: &str) -> Option<String> {
        let given = decode_entities(given);
        let expected = decode_entities(expected);
        let body = blank_marker_content(&expected).unwrap_or(&*expected);
        if given == body {
            return None;
        }
        let code = markup::diff(&given, body);
        if code.is_empty() {
            None
        } else {
            Some(code)
        }
    }
}
