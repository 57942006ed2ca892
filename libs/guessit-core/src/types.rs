//! Core types for guessit questions.

use crate::error::{ConfigError, Result};
use crate::matching;
use crate::normalize::decode_entities;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 1-based position of a gap (phrase mode) or letter slot (wordle mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceIndex(u32);

impl PlaceIndex {
    /// Create a place index. Returns None for 0.
    pub fn new(value: u32) -> Option<Self> {
        if value == 0 {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Form field name used by the host store, e.g. `p3`.
    pub fn field_name(self) -> String {
        format!("p{}", self.0)
    }

    /// Parse a form field name such as `p3`.
    pub fn from_field_name(name: &str) -> Option<Self> {
        let digits = name.strip_prefix('p')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse::<u32>().ok().and_then(Self::new)
    }
}

impl fmt::Display for PlaceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One gap or letter slot and its expected answer.
///
/// The answer may hold alternatives (`cat|dog`) or the blank marker
/// (`!!word!!`). It is stored as authored, possibly HTML-escaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub index: PlaceIndex,
    pub answer: String,
}

/// Question mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// One gap per word of a phrase.
    Phrase,
    /// One letter slot per character of a single word.
    Wordle,
}

impl Default for Mode {
    fn default() -> Self {
        Self::Phrase
    }
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Phrase => "phrase",
            Self::Wordle => "wordle",
        }
    }
}

/// How wide gaps are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapSizePolicy {
    #[serde(alias = "gapsizegrow")]
    Grow,
    #[serde(alias = "gapsizematchword")]
    MatchWord,
    #[serde(alias = "gapsizefixed")]
    Fixed,
}

impl Default for GapSizePolicy {
    fn default() -> Self {
        Self::Grow
    }
}

/// Default countback penalty: a third of the place mark per wrong try.
pub const DEFAULT_PENALTY_PER_TRY: f64 = 1.0 / 3.0;

/// Authoring-time options, read-only during grading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionSettings {
    pub case_sensitive: bool,
    pub mode: Mode,
    pub gap_size_policy: GapSizePolicy,
    /// Tries before help is offered; 0 means never.
    pub max_tries_before_help: u32,
    /// Maximum tries in wordle mode; 0 means unlimited.
    pub max_tries_wordle: u32,
    pub remove_specific_feedback_when_complete: bool,
    pub penalty_per_try: f64,
}

impl Default for QuestionSettings {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            mode: Mode::default(),
            gap_size_policy: GapSizePolicy::default(),
            max_tries_before_help: 0,
            max_tries_wordle: 0,
            remove_specific_feedback_when_complete: false,
            penalty_per_try: DEFAULT_PENALTY_PER_TRY,
        }
    }
}

impl QuestionSettings {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.penalty_per_try) {
            return Err(ConfigError::InvalidPenalty(self.penalty_per_try));
        }
        Ok(())
    }
}

/// Rendered width of a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapSize {
    /// Initial width in characters.
    pub width: usize,
    /// Whether the input grows as the student types.
    pub grows: bool,
}

/// Structured right-answer data; the renderer supplies the words for
/// "or" and "blank".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerDisplay {
    pub alternatives: Vec<String>,
    pub blank_allowed: bool,
}

/// An authored question: contiguous places plus settings.
///
/// Deserializing goes through [`Question::new`], so a stored question
/// is checked the same way as a freshly parsed one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawQuestion")]
pub struct Question {
    places: Vec<Place>,
    settings: QuestionSettings,
}

#[derive(Deserialize)]
struct RawQuestion {
    places: Vec<Place>,
    #[serde(default)]
    settings: QuestionSettings,
}

impl TryFrom<RawQuestion> for Question {
    type Error = ConfigError;

    fn try_from(raw: RawQuestion) -> Result<Self> {
        Self::new(raw.places, raw.settings)
    }
}

impl Question {
    /// Build a question, checking that places run 1..=N in order.
    pub fn new(places: Vec<Place>, settings: QuestionSettings) -> Result<Self> {
        if places.is_empty() {
            return Err(ConfigError::NoGaps);
        }
        for (offset, place) in places.iter().enumerate() {
            let expected = offset as u32 + 1;
            if place.index.get() != expected {
                return Err(ConfigError::NonContiguousPlaces {
                    expected,
                    found: place.index.get(),
                });
            }
        }
        settings.validate()?;
        Ok(Self { places, settings })
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn settings(&self) -> &QuestionSettings {
        &self.settings
    }

    pub fn gap_count(&self) -> usize {
        self.places.len()
    }

    pub fn place(&self, index: PlaceIndex) -> Option<&Place> {
        self.places.get(index.get() as usize - 1)
    }

    /// The response that would earn full marks: each answer as
    /// authored, since given text is decoded once when it is graded.
    pub fn correct_response(&self) -> Response {
        self.places
            .iter()
            .map(|p| (p.index, p.answer.clone()))
            .collect()
    }

    /// Width of the widest expected answer.
    pub fn max_gap_size(&self) -> usize {
        self.places
            .iter()
            .map(|p| answer_width(&p.answer))
            .max()
            .unwrap_or(0)
    }

    /// Rendered size of a gap under the configured policy.
    pub fn gap_size(&self, index: PlaceIndex) -> Option<GapSize> {
        let place = self.place(index)?;
        let size = match self.settings.gap_size_policy {
            GapSizePolicy::Fixed => GapSize {
                width: self.max_gap_size(),
                grows: false,
            },
            GapSizePolicy::MatchWord => GapSize {
                width: answer_width(&place.answer),
                grows: false,
            },
            GapSizePolicy::Grow => GapSize {
                width: answer_width(&place.answer),
                grows: true,
            },
        };
        Some(size)
    }

    /// Right answer split for display.
    pub fn answer_display(&self, index: PlaceIndex) -> Option<AnswerDisplay> {
        let place = self.place(index)?;
        let decoded = decode_entities(&place.answer);
        let (body, blank_allowed) = match matching::blank_marker_content(&decoded) {
            Some(inner) => (inner, true),
            None => (&*decoded, false),
        };
        let alternatives = body
            .split(matching::ALTERNATIVE_SEPARATOR)
            .map(str::trim)
            .filter(|alt| !alt.is_empty())
            .map(str::to_string)
            .collect();
        Some(AnswerDisplay {
            alternatives,
            blank_allowed,
        })
    }
}

fn answer_width(answer: &str) -> usize {
    decode_entities(answer).chars().count()
}

/// One try's worth of student text, keyed by place.
///
/// Ordered by place index; a missing place reads as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Response(BTreeMap<PlaceIndex, String>);

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, index: PlaceIndex, text: impl Into<String>) {
        self.0.insert(index, text.into());
    }

    /// Text for a place, or `""` if the student left it untouched.
    pub fn get(&self, index: PlaceIndex) -> &str {
        self.0.get(&index).map(String::as_str).unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlaceIndex, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gradable once at least one place is non-blank.
    pub fn is_gradable(&self) -> bool {
        self.0.values().any(|v| !v.is_empty())
    }

    /// Same text in every place. Untouched places count as empty.
    pub fn is_same(&self, other: &Response) -> bool {
        self.0
            .keys()
            .chain(other.0.keys())
            .all(|k| self.get(*k) == other.get(*k))
    }

    /// Place values joined in place order.
    pub fn summary(&self) -> String {
        self.0.values().map(String::as_str).collect::<Vec<_>>().join(" ")
    }
}

impl FromIterator<(PlaceIndex, String)> for Response {
    fn from_iter<I: IntoIterator<Item = (PlaceIndex, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Three-state feedback class for a gap or letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceState {
    Correct,
    PartiallyCorrect,
    Incorrect,
}

impl PlaceState {
    pub fn is_correct(self) -> bool {
        self == Self::Correct
    }
}

/// Wordle letter classification, serialized as 0/1/2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum LetterState {
    Absent,
    Misplaced,
    Exact,
}

impl LetterState {
    pub fn code(self) -> u8 {
        match self {
            Self::Absent => 0,
            Self::Misplaced => 1,
            Self::Exact => 2,
        }
    }
}

impl From<LetterState> for u8 {
    fn from(state: LetterState) -> Self {
        state.code()
    }
}

impl TryFrom<u8> for LetterState {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Absent),
            1 => Ok(Self::Misplaced),
            2 => Ok(Self::Exact),
            other => Err(format!("invalid letter state {other}")),
        }
    }
}

impl From<LetterState> for PlaceState {
    fn from(state: LetterState) -> Self {
        match state {
            LetterState::Exact => Self::Correct,
            LetterState::Misplaced => Self::PartiallyCorrect,
            LetterState::Absent => Self::Incorrect,
        }
    }
}

/// Per-letter states for one guess.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LetterStates(pub Vec<LetterState>);

impl LetterStates {
    /// Compact form, e.g. `"20222"`.
    pub fn to_code_string(&self) -> String {
        self.0
            .iter()
            .map(|s| char::from(b'0' + s.code()))
            .collect()
    }

    pub fn all_exact(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(|s| *s == LetterState::Exact)
    }
}
