//! Grades over a set of places, for one try and across tries.

use crate::mode::PlaceMatcher;
use crate::types::{Place, Response};
use serde::{Deserialize, Serialize};

/// Fractions this close to 0 or 1 are treated as exactly 0 or 1.
const FRACTION_TOLERANCE: f64 = 1e-7;

/// Outcome class for a graded try.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradedState {
    Right,
    Partial,
    Wrong,
}

impl GradedState {
    pub fn for_fraction(fraction: f64) -> Self {
        if fraction >= 1.0 - FRACTION_TOLERANCE {
            Self::Right
        } else if fraction <= FRACTION_TOLERANCE {
            Self::Wrong
        } else {
            Self::Partial
        }
    }
}

/// Grade for a single response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub num_right: usize,
    pub total: usize,
    pub fraction: f64,
    pub state: GradedState,
}

/// Count places answered correctly. Returns `(num_right, total)`.
pub fn count_correct(
    response: &Response,
    places: &[Place],
    matcher: &dyn PlaceMatcher,
) -> (usize, usize) {
    let num_right = places
        .iter()
        .filter(|p| matcher.is_place_correct(response.get(p.index), &p.answer))
        .count();
    (num_right, places.len())
}

/// Proportion of places answered correctly.
///
/// `places` must not be empty; questions with no places are rejected
/// when they are built. An empty slice grades as 0.
pub fn grade_fraction(response: &Response, places: &[Place], matcher: &dyn PlaceMatcher) -> f64 {
    let (num_right, total) = count_correct(response, places, matcher);
    if total == 0 {
        return 0.0;
    }
    num_right as f64 / total as f64
}

/// Grade a response with its outcome class.
pub fn grade_response(response: &Response, places: &[Place], matcher: &dyn PlaceMatcher) -> Grade {
    let (num_right, total) = count_correct(response, places, matcher);
    let fraction = if total == 0 {
        0.0
    } else {
        num_right as f64 / total as f64
    };
    Grade {
        num_right,
        total,
        fraction,
        state: GradedState::for_fraction(fraction),
    }
}

/// Final grade over a sequence of tries, oldest first.
///
/// Each place earns `max(0, 1 - (last_wrong + 1) * penalty_per_try)`
/// if it is correct in the final try, where `last_wrong` is the index
/// of the last try in which it was wrong (no wrong try costs nothing).
/// A place wrong in the final try earns 0. The result is the mean over
/// all places. Each place score is held to `0.0..=1.0` whatever the
/// penalty, so the grade stays within `0.0..=1.0` too.
pub fn countback(
    history: &[Response],
    places: &[Place],
    matcher: &dyn PlaceMatcher,
    penalty_per_try: f64,
) -> f64 {
    if places.is_empty() || history.is_empty() {
        return 0.0;
    }

    let total: f64 = places
        .iter()
        .map(|place| {
            let mut last_wrong: Option<usize> = None;
            let mut correct_now = false;
            for (i, response) in history.iter().enumerate() {
                correct_now = matcher.is_place_correct(response.get(place.index), &place.answer);
                if !correct_now {
                    last_wrong = Some(i);
                }
            }
            if !correct_now {
                return 0.0;
            }
            let wrong_tries = last_wrong.map(|i| i + 1).unwrap_or(0);
            (1.0 - wrong_tries as f64 * penalty_per_try).clamp(0.0, 1.0)
        })
        .sum();

    let grade = total / places.len() as f64;
    tracing::debug!(
        tries = history.len(),
        places = places.len(),
        grade,
        "countback computed"
    );
    grade
}
