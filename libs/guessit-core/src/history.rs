//! Attempt history: stored steps projected into ordered responses.

use crate::error::ProjectionError;
use crate::types::{PlaceIndex, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row from the host's attempt-step store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredStep {
    pub sequence: u32,
    pub timestamp: DateTime<Utc>,
    /// Field name to raw text, e.g. `p1 -> "cat"`. Key order is not
    /// meaningful.
    #[serde(default)]
    pub data: HashMap<String, String>,
    /// Whether the student submitted this step as a try.
    #[serde(default)]
    pub is_try: bool,
    /// False when the step failed pre-submit validation.
    #[serde(default = "default_valid")]
    pub valid: bool,
}

fn default_valid() -> bool {
    true
}

/// When and where a try was stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TryRecord {
    pub sequence: u32,
    pub timestamp: DateTime<Utc>,
}

/// Submitted tries in order, oldest first. Read-only once projected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttemptHistory {
    records: Vec<TryRecord>,
    responses: Vec<Response>,
}

impl AttemptHistory {
    /// Keep submitted, valid steps, order them by sequence and turn
    /// their `p<N>` fields into responses.
    ///
    /// Fields that are not place fields (`_allanswers`, `-submit`, ...)
    /// are skipped. Values are trimmed but kept as stored; the matchers
    /// decode HTML entities once when they compare.
    pub fn project(steps: &[StoredStep]) -> Result<Self, ProjectionError> {
        let mut kept: Vec<&StoredStep> = steps.iter().filter(|s| s.is_try && s.valid).collect();
        // Stable: steps sharing a sequence keep their stored order.
        kept.sort_by_key(|s| s.sequence);

        let mut history = Self::default();
        for step in kept {
            let response = project_step(step)?;
            history.records.push(TryRecord {
                sequence: step.sequence,
                timestamp: step.timestamp,
            });
            history.responses.push(response);
        }

        tracing::debug!(
            stored = steps.len(),
            tries = history.responses.len(),
            "projected attempt history"
        );
        Ok(history)
    }

    pub fn try_count(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    /// The latest try.
    pub fn current(&self) -> Option<&Response> {
        self.responses.last()
    }

    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    pub fn tries(&self) -> impl Iterator<Item = (&TryRecord, &Response)> {
        self.records.iter().zip(self.responses.iter())
    }
}

fn project_step(step: &StoredStep) -> Result<Response, ProjectionError> {
    let mut response = Response::new();
    for (name, value) in &step.data {
        let Some(digits) = name.strip_prefix('p') else {
            continue;
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }
        let index = PlaceIndex::from_field_name(name).ok_or_else(|| {
            ProjectionError::InvalidFieldName {
                sequence: step.sequence,
                name: name.clone(),
            }
        })?;
        response.insert(index, value.trim());
    }
    Ok(response)
}
