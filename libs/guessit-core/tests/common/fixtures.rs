//! Test fixtures: the two canonical questions and step factories.

use chrono::{TimeZone, Utc};
use std::collections::HashMap;

use guessit_core::{parse, Grader, Mode, Question, QuestionSettings, StoredStep};

/// Phrase question: "Too many cooks spoil the broth."
pub fn too_many_cooks() -> Question {
    parse("Too many cooks spoil the broth.", QuestionSettings::default())
        .expect("fixture question should parse")
}

/// Wordle question: PIZZA.
pub fn pizza(max_tries: u32) -> Question {
    let settings = QuestionSettings {
        mode: Mode::Wordle,
        max_tries_wordle: max_tries,
        ..Default::default()
    };
    parse("PIZZA", settings).expect("fixture question should parse")
}

pub fn grader(question: Question) -> Grader {
    Grader::new(question)
}

/// A submitted try with one value per place, in place order.
pub fn try_step(sequence: u32, values: &[&str]) -> StoredStep {
    let data: HashMap<String, String> = values
        .iter()
        .enumerate()
        .map(|(i, v)| (format!("p{}", i + 1), v.to_string()))
        .collect();
    StoredStep {
        sequence,
        timestamp: Utc.timestamp_opt(1_278_603_947 + sequence as i64, 0).unwrap(),
        data,
        is_try: true,
        valid: true,
    }
}

/// An autosave step that was never submitted.
pub fn autosave_step(sequence: u32, values: &[&str]) -> StoredStep {
    StoredStep {
        is_try: false,
        ..try_step(sequence, values)
    }
}

/// A wordle guess split into one letter per place.
pub fn guess_step(sequence: u32, word: &str) -> StoredStep {
    let letters: Vec<String> = word.chars().map(String::from).collect();
    let refs: Vec<&str> = letters.iter().map(String::as_str).collect();
    try_step(sequence, &refs)
}
