//! Gap extraction for authored questions.
//!
//! # Formats
//! Answer text, phrase mode: one gap per whitespace-separated token.
//! ```text
//! Too many cooks spoil the broth.
//! ```
//! Answer text, wordle mode: one place per letter.
//! ```text
//! PIZZA
//! ```
//! Question text may also carry its gaps inline between brackets:
//! ```text
//! The [cat] sat on the [mat|rug].
//! ```

use crate::error::{ConfigError, Result};
use crate::matching::alternatives_are_valid;
use crate::types::{Mode, Place, PlaceIndex, Question, QuestionSettings};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HTML_COMMENT: Regex =
        Regex::new(r"<!--(?s:.*?)-->").expect("hardcoded regex should compile");
    static ref DELIMITED_GAP: Regex =
        Regex::new(r"\[(.*?)\]").expect("hardcoded regex should compile");
}

/// Split answer text into places numbered from 1.
pub fn extract_gaps(answer_text: &str, mode: Mode) -> Vec<Place> {
    let tokens: Vec<String> = match mode {
        Mode::Phrase => answer_text.split_whitespace().map(str::to_string).collect(),
        Mode::Wordle => answer_text
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(String::from)
            .collect(),
    };

    tokens
        .into_iter()
        .zip(1u32..)
        .filter_map(|(answer, n)| PlaceIndex::new(n).map(|index| Place { index, answer }))
        .collect()
}

/// Text inside each `[...]` pair of the question text.
///
/// HTML comments are removed first since editors put brackets in them.
pub fn delimited_gaps(question_text: &str) -> Vec<String> {
    let text = HTML_COMMENT.replace_all(question_text, "");
    DELIMITED_GAP
        .captures_iter(&text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Question text around the `[...]` gaps. Fragment 0 precedes gap 1.
pub fn text_fragments(question_text: &str) -> Vec<String> {
    let text = HTML_COMMENT.replace_all(question_text, "");
    DELIMITED_GAP.split(&text).map(str::to_string).collect()
}

pub fn has_at_least_one_gap(places: &[Place]) -> bool {
    !places.is_empty()
}

/// Extract and validate places for the editing form.
pub fn validate(answer_text: &str, mode: Mode) -> Result<Vec<Place>> {
    check_places(extract_gaps(answer_text, mode), mode)
}

/// Places taken from the `[...]` gaps of question text.
///
/// In phrase mode each bracket pair is one place, spaces included. In
/// wordle mode the bracketed text is read as the word.
pub fn question_text_gaps(question_text: &str, mode: Mode) -> Vec<Place> {
    let gaps = delimited_gaps(question_text);
    match mode {
        Mode::Phrase => gaps
            .into_iter()
            .map(|gap| gap.trim().to_string())
            .zip(1u32..)
            .filter_map(|(answer, n)| PlaceIndex::new(n).map(|index| Place { index, answer }))
            .collect(),
        Mode::Wordle => extract_gaps(&gaps.concat(), mode),
    }
}

fn check_places(places: Vec<Place>, mode: Mode) -> Result<Vec<Place>> {
    if !has_at_least_one_gap(&places) {
        return Err(ConfigError::NoGaps);
    }

    for place in &places {
        let position = place.index.get() as usize;
        match mode {
            Mode::Wordle => {
                if let Some(found) = place.answer.chars().find(|c| !c.is_ascii_uppercase()) {
                    return Err(ConfigError::WordleCapitalsOnly { position, found });
                }
            }
            Mode::Phrase => {
                if !alternatives_are_valid(&place.answer) {
                    return Err(ConfigError::MalformedAlternatives {
                        position,
                        answer: place.answer.clone(),
                    });
                }
            }
        }
    }

    Ok(places)
}

/// Build a question from answer text and settings.
pub fn parse(answer_text: &str, settings: QuestionSettings) -> Result<Question> {
    let places = validate(answer_text, settings.mode)?;
    tracing::debug!(
        mode = settings.mode.as_str(),
        gaps = places.len(),
        "parsed question"
    );
    Question::new(places, settings)
}

/// Build a question from question text with inline `[...]` gaps.
pub fn parse_question_text(question_text: &str, settings: QuestionSettings) -> Result<Question> {
    let places = check_places(question_text_gaps(question_text, settings.mode), settings.mode)?;
    tracing::debug!(
        mode = settings.mode.as_str(),
        gaps = places.len(),
        "parsed question text"
    );
    Question::new(places, settings)
}
