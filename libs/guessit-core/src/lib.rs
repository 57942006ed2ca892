//! Answer matching and scoring for guess-it questions.
//!
//! Provides:
//! - Text normalization (case folding, diacritic stripping, entity decoding)
//! - Per-gap matching with alternatives and blank-allowed answers
//! - Close-miss markup hints
//! - Wordle letter classification
//! - Fraction and countback grading
//! - Projection of stored attempt steps into feedback reports

pub mod error;
pub mod feedback;
pub mod grading;
pub mod history;
pub mod markup;
pub mod matching;
pub mod mode;
pub mod normalize;
pub mod parser;
pub mod types;

pub use error::{ConfigError, ProjectionError, Result};
pub use feedback::{FeedbackKey, FeedbackReport, Grader, PlaceFeedback, TryFeedback};
pub use grading::{count_correct, countback, grade_fraction, grade_response, Grade, GradedState};
pub use history::{AttemptHistory, StoredStep, TryRecord};
pub use markup::diff;
pub use matching::{alternatives_are_valid, gap_state, is_correct, literal_match};
pub use mode::{matcher_for, PlaceMatcher};
pub use normalize::{decode_entities, fold, strip_diacritics};
pub use parser::{
    delimited_gaps, extract_gaps, has_at_least_one_gap, parse, parse_question_text,
    question_text_gaps, text_fragments, validate,
};
pub use types::{
    AnswerDisplay, GapSize, GapSizePolicy, LetterState, LetterStates, Mode, Place, PlaceIndex,
    PlaceState, Question, QuestionSettings, Response,
};
