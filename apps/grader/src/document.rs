//! Input and output documents for the grader.

use serde::{Deserialize, Serialize};

use guessit_core::{AnswerDisplay, FeedbackReport, GapSize, PlaceIndex, QuestionSettings, StoredStep};

/// A question with its settings and the attempt steps stored so far.
#[derive(Debug, Clone, Deserialize)]
pub struct GradeRequest {
    /// Answer text the gaps are extracted from.
    #[serde(default)]
    pub answer_text: Option<String>,
    /// Question text with inline `[...]` gaps. Used for the gaps when
    /// there is no answer text, and split into display fragments.
    #[serde(default)]
    pub question_text: Option<String>,
    #[serde(default)]
    pub settings: QuestionSettings,
    #[serde(default)]
    pub steps: Vec<StoredStep>,
}

/// Rendering data for one gap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapInfo {
    pub index: PlaceIndex,
    pub field: String,
    pub size: GapSize,
    pub answer: AnswerDisplay,
}

/// Everything printed for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeResponse {
    pub gaps: Vec<GapInfo>,
    /// Question text around the gaps; fragment 0 precedes gap 1.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fragments: Vec<String>,
    pub max_gap_size: usize,
    /// Field name to expected text, as a full-marks response.
    pub correct_response: std::collections::BTreeMap<String, String>,
    /// Latest try joined in place order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Whether the latest try repeats the one before it.
    pub repeated: bool,
    #[serde(flatten)]
    pub report: FeedbackReport,
}
