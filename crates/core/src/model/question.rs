use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;

/// Every practice question offers exactly this many choices.
pub const OPTIONS_PER_QUESTION: usize = 4;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question {id} has no prompt text")]
    EmptyPrompt { id: QuestionId },

    #[error("question {id} has {found} options, expected 4")]
    WrongOptionCount { id: QuestionId, found: usize },

    #[error("question {id} repeats option {option:?}")]
    DuplicateOption { id: QuestionId, option: String },

    #[error("question {id} has correct answer {answer:?} which is not one of its options")]
    AnswerNotAnOption { id: QuestionId, answer: String },
}

//
// ─── DRAFT (unvalidated, as received) ─────────────────────────────────────────
//

/// A question exactly as the model produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    pub id: QuestionId,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
}

impl QuestionDraft {
    /// Check the multiple-choice shape.
    ///
    /// Option and answer comparison is exact: no trimming, no case folding.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the prompt is blank, the option count is not
    /// [`OPTIONS_PER_QUESTION`], options repeat, or the answer is not an option.
    pub fn validate(self) -> Result<PracticeQuestion, QuestionError> {
        let id = self.id;
        if self.question.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt { id });
        }
        if self.options.len() != OPTIONS_PER_QUESTION {
            return Err(QuestionError::WrongOptionCount {
                id,
                found: self.options.len(),
            });
        }

        let mut seen = HashSet::with_capacity(self.options.len());
        for option in &self.options {
            if !seen.insert(option.as_str()) {
                return Err(QuestionError::DuplicateOption {
                    id,
                    option: option.clone(),
                });
            }
        }

        if !seen.contains(self.correct_answer.as_str()) {
            return Err(QuestionError::AnswerNotAnOption {
                id,
                answer: self.correct_answer,
            });
        }

        Ok(PracticeQuestion {
            id,
            question: self.question,
            options: self.options,
            correct_answer: self.correct_answer,
            explanation: self.explanation,
        })
    }
}

//
// ─── VALIDATED ENTITY ─────────────────────────────────────────────────────────
//

/// A multiple-choice question whose correct answer is one of exactly four distinct options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeQuestion {
    id: QuestionId,
    question: String,
    options: Vec<String>,
    correct_answer: String,
    explanation: String,
}

impl PracticeQuestion {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|candidate| candidate == option)
    }

    #[must_use]
    pub fn is_correct(&self, option: &str) -> bool {
        self.correct_answer == option
    }
}
