//! Turning response text into typed contracts.

use std::collections::HashSet;

use tutor_core::model::{AnalysisResult, PracticeQuestion, QuestionDraft};

use crate::error::GatewayError;

/// Parse an analysis payload.
///
/// # Errors
///
/// Returns `GatewayError::EmptyResponse` for blank text and
/// `GatewayError::MalformedResponse` when the JSON does not match `AnalysisResult`.
pub fn parse_analysis(text: &str) -> Result<AnalysisResult, GatewayError> {
    let json = json_body(text)?;
    serde_json::from_str(json).map_err(|err| GatewayError::MalformedResponse(err.to_string()))
}

/// Parse and validate a quiz payload of exactly `expected` questions.
///
/// # Errors
///
/// Returns `GatewayError::EmptyResponse` for blank text and
/// `GatewayError::MalformedResponse` when the JSON does not match, the count is
/// wrong, ids repeat, or any question fails validation.
pub fn parse_quiz(text: &str, expected: usize) -> Result<Vec<PracticeQuestion>, GatewayError> {
    let json = json_body(text)?;
    let drafts: Vec<QuestionDraft> = serde_json::from_str(json)
        .map_err(|err| GatewayError::MalformedResponse(err.to_string()))?;

    if drafts.len() != expected {
        return Err(GatewayError::MalformedResponse(format!(
            "expected {expected} questions, got {}",
            drafts.len()
        )));
    }

    let mut ids = HashSet::with_capacity(drafts.len());
    let mut questions = Vec::with_capacity(drafts.len());
    for draft in drafts {
        if !ids.insert(draft.id) {
            return Err(GatewayError::MalformedResponse(format!(
                "question id {} appears more than once",
                draft.id
            )));
        }
        let question = draft
            .validate()
            .map_err(|err| GatewayError::MalformedResponse(err.to_string()))?;
        questions.push(question);
    }
    Ok(questions)
}

/// Trim the payload and drop a Markdown code fence if the model added one.
fn json_body(text: &str) -> Result<&str, GatewayError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(GatewayError::EmptyResponse);
    }
    let Some(rest) = trimmed.strip_prefix("```") else {
        return Ok(trimmed);
    };
    let rest = match rest.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
        _ => rest,
    };
    let body = rest.strip_suffix("```").unwrap_or(rest).trim();
    if body.is_empty() {
        return Err(GatewayError::EmptyResponse);
    }
    Ok(body)
}
