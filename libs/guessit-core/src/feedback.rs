//! Feedback reports for the renderer.
//!
//! `Grader` ties a question to its matcher and turns an attempt history
//! into per-try rows, the current grade and the countback grade.

use crate::grading::{self, Grade};
use crate::history::{AttemptHistory, TryRecord};
use crate::mode::{matcher_for, PlaceMatcher};
use crate::types::{Mode, PlaceIndex, PlaceState, Question, Response};
use serde::{Deserialize, Serialize};

/// Locale-independent reason codes for feedback text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeedbackKey {
    NeedsAnswer,
    TryLimitReached,
    HelpAvailable,
    AllCorrect,
}

/// Feedback for one place in one try.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceFeedback {
    pub index: PlaceIndex,
    pub given: String,
    pub state: PlaceState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markup: Option<String>,
}

/// Feedback for one try.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TryFeedback {
    #[serde(flatten)]
    pub record: Option<TryRecord>,
    pub places: Vec<PlaceFeedback>,
    /// Wordle letter states, e.g. `"20222"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letters: Option<String>,
    pub grade: Grade,
}

/// Everything the renderer needs for the current state of an attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackReport {
    pub mode: Mode,
    pub try_count: usize,
    pub tries: Vec<TryFeedback>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<Grade>,
    pub final_grade: f64,
    pub complete: bool,
    pub help_available: bool,
    pub max_tries_reached: bool,
    pub show_specific_feedback: bool,
    pub feedback: Vec<FeedbackKey>,
}

/// Grades responses to one question.
pub struct Grader {
    question: Question,
    matcher: Box<dyn PlaceMatcher>,
}

impl Grader {
    pub fn new(question: Question) -> Self {
        let matcher = matcher_for(question.settings());
        Self { question, matcher }
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn matcher(&self) -> &dyn PlaceMatcher {
        &*self.matcher
    }

    /// Grade one response.
    pub fn grade(&self, response: &Response) -> Grade {
        grading::grade_response(response, self.question.places(), self.matcher())
    }

    /// Countback grade over every try.
    pub fn final_grade(&self, history: &AttemptHistory) -> f64 {
        grading::countback(
            history.responses(),
            self.question.places(),
            self.matcher(),
            self.question.settings().penalty_per_try,
        )
    }

    /// Per-place feedback for one response.
    pub fn try_feedback(&self, record: Option<TryRecord>, response: &Response) -> TryFeedback {
        let places = self.question.places();
        let states = self.matcher.classify(response, places);

        let place_feedback = places
            .iter()
            .zip(states)
            .map(|(place, state)| {
                let given = response.get(place.index);
                PlaceFeedback {
                    index: place.index,
                    given: given.to_string(),
                    state,
                    markup: self.matcher.markup(given, &place.answer),
                }
            })
            .collect();

        TryFeedback {
            record,
            places: place_feedback,
            letters: self
                .matcher
                .letter_states(response, places)
                .map(|states| states.to_code_string()),
            grade: self.grade(response),
        }
    }

    /// Build the full report for an attempt.
    pub fn report(&self, history: &AttemptHistory) -> FeedbackReport {
        let settings = self.question.settings();
        let try_count = history.try_count();

        let tries: Vec<TryFeedback> = history
            .tries()
            .map(|(record, response)| self.try_feedback(Some(*record), response))
            .collect();

        let current = history.current().map(|r| self.grade(r));
        let complete = current
            .map(|g| g.total > 0 && g.num_right == g.total)
            .unwrap_or(false);
        let needs_answer = history.current().map(|r| !r.is_gradable()).unwrap_or(true);

        let help_available = settings.mode == Mode::Phrase
            && settings.max_tries_before_help > 0
            && try_count >= settings.max_tries_before_help as usize;
        let max_tries_reached = settings.mode == Mode::Wordle
            && settings.max_tries_wordle > 0
            && try_count >= settings.max_tries_wordle as usize;

        let mut feedback = Vec::new();
        if needs_answer {
            feedback.push(FeedbackKey::NeedsAnswer);
        }
        if complete {
            feedback.push(FeedbackKey::AllCorrect);
        } else {
            if max_tries_reached {
                feedback.push(FeedbackKey::TryLimitReached);
            }
            if help_available {
                feedback.push(FeedbackKey::HelpAvailable);
            }
        }

        let report = FeedbackReport {
            mode: settings.mode,
            try_count,
            tries,
            current,
            final_grade: self.final_grade(history),
            complete,
            help_available,
            max_tries_reached,
            show_specific_feedback: !(complete && settings.remove_specific_feedback_when_complete),
            feedback,
        };

        tracing::debug!(
            mode = settings.mode.as_str(),
            tries = try_count,
            complete,
            final_grade = report.final_grade,
            "built feedback report"
        );
        report
    }
}
