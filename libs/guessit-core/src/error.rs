//! Error types for guessit-core.

use thiserror::Error;

/// Result type alias using ConfigError.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while validating an authored question.
///
/// These are surfaced to the editing form before any grading happens;
/// the grading functions themselves never fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("no gaps found in answer text")]
    NoGaps,

    #[error("place {found} out of sequence, expected place {expected}")]
    NonContiguousPlaces { expected: u32, found: u32 },

    #[error("wordle answers accept capital letters A-Z only, found {found:?} at position {position}")]
    WordleCapitalsOnly { position: usize, found: char },

    #[error("place {position} has malformed alternatives: {answer:?}")]
    MalformedAlternatives { position: usize, answer: String },

    #[error("penalty per try must be within 0.0..=1.0, got {0}")]
    InvalidPenalty(f64),
}

/// Errors raised while turning stored attempt steps into responses.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("invalid field name {name:?} in step {sequence}")]
    InvalidFieldName { sequence: u32, name: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
