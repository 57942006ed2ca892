//! Command-line grader: reads a question with its stored attempt steps
//! as JSON and prints the feedback report as JSON.

pub mod document;

use std::io::Read;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use guessit_core::{parse, parse_question_text, text_fragments, AttemptHistory, Grader, Question};

use crate::document::{GapInfo, GradeRequest, GradeResponse};

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let input = read_input()?;
    let response = grade_document(&input)?;

    let pretty = std::env::var("GUESSIT_PRETTY")
        .map(|v| is_enabled(&v))
        .unwrap_or(false);
    let output = if pretty {
        serde_json::to_string_pretty(&response)
    } else {
        serde_json::to_string(&response)
    }
    .context("failed to serialize feedback report")?;

    println!("{}", output);
    Ok(())
}

/// Read the request from `GUESSIT_INPUT`, the first argument, or stdin.
fn read_input() -> anyhow::Result<String> {
    let path = std::env::var("GUESSIT_INPUT")
        .ok()
        .or_else(|| std::env::args().nth(1));

    match path {
        Some(path) if path != "-" => {
            tracing::info!("Reading request from {}", path);
            std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path))
        }
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read request from stdin")?;
            Ok(buf)
        }
    }
}

fn is_enabled(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Parse a JSON request and grade it.
pub fn grade_document(input: &str) -> anyhow::Result<GradeResponse> {
    let request: GradeRequest =
        serde_json::from_str(input).context("invalid grade request")?;
    grade(request)
}

fn build_question(request: &GradeRequest) -> anyhow::Result<Question> {
    let settings = request.settings.clone();
    match (&request.answer_text, &request.question_text) {
        (Some(answer_text), _) => parse(answer_text, settings),
        (None, Some(question_text)) => parse_question_text(question_text, settings),
        (None, None) => anyhow::bail!("request needs answer_text or question_text"),
    }
    .context("invalid question")
}

/// Build the question, project the stored steps and report on them.
pub fn grade(request: GradeRequest) -> anyhow::Result<GradeResponse> {
    let question = build_question(&request)?;
    let history = AttemptHistory::project(&request.steps).context("invalid attempt steps")?;

    let grader = Grader::new(question);
    let question = grader.question();

    let gaps = question
        .places()
        .iter()
        .filter_map(|place| {
            Some(GapInfo {
                index: place.index,
                field: place.index.field_name(),
                size: question.gap_size(place.index)?,
                answer: question.answer_display(place.index)?,
            })
        })
        .collect();

    let correct_response = question
        .correct_response()
        .iter()
        .map(|(index, text)| (index.field_name(), text.to_string()))
        .collect();

    let repeated = match history.responses() {
        [.., previous, latest] => latest.is_same(previous),
        _ => false,
    };

    let report = grader.report(&history);
    tracing::info!(
        tries = report.try_count,
        final_grade = report.final_grade,
        complete = report.complete,
        "graded attempt"
    );

    let fragments = request
        .question_text
        .as_deref()
        .map(text_fragments)
        .unwrap_or_default();

    Ok(GradeResponse {
        gaps,
        fragments,
        max_gap_size: question.max_gap_size(),
        correct_response,
        summary: history.current().map(|r| r.summary()),
        repeated,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_flag_values() {
        assert!(is_enabled("1"));
        assert!(is_enabled("TRUE"));
        assert!(is_enabled(" yes "));
        assert!(!is_enabled("0"));
        assert!(!is_enabled(""));
    }
}
