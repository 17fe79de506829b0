use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::analysis::AnalysisResult;
use crate::model::ids::SessionId;
use crate::model::image::UploadedImage;
use crate::model::question::PracticeQuestion;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("{intent} is not accepted while {step}")]
    InvalidTransition { step: Step, intent: Intent },

    #[error("completion does not belong to this session")]
    StaleTicket,

    #[error("the generated quiz has no questions")]
    EmptyQuiz,

    #[error("the current question has not been answered yet")]
    NotAnswered,

    #[error("{0:?} is not one of the current options")]
    UnknownOption(String),
}

//
// ─── STEPS & INTENTS ──────────────────────────────────────────────────────────
//

/// The active screen of the workflow. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Upload,
    Analyzing,
    Review,
    GeneratingQuiz,
    Practice,
    Success,
    /// Generic failure screen. No transition enters it; it only accepts `Reset`.
    Error,
}

impl Step {
    /// Busy steps wait on a gateway call and accept no intents.
    #[must_use]
    pub const fn is_busy(self) -> bool {
        matches!(self, Step::Analyzing | Step::GeneratingQuiz)
    }

    /// Intents the view may emit on this step.
    #[must_use]
    pub const fn allowed_intents(self) -> &'static [Intent] {
        match self {
            Step::Upload => &[Intent::SelectImage],
            Step::Review => &[Intent::Proceed],
            Step::Practice => &[Intent::SelectAnswer, Intent::Advance],
            Step::Success | Step::Error => &[Intent::Reset],
            Step::Analyzing | Step::GeneratingQuiz => &[],
        }
    }

    #[must_use]
    pub fn accepts(self, intent: Intent) -> bool {
        self.allowed_intents().contains(&intent)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Step::Upload => "upload",
            Step::Analyzing => "analyzing",
            Step::Review => "review",
            Step::GeneratingQuiz => "generating quiz",
            Step::Practice => "practice",
            Step::Success => "success",
            Step::Error => "error",
        };
        f.write_str(label)
    }
}

/// The complete vocabulary of user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    SelectImage,
    Proceed,
    SelectAnswer,
    Advance,
    Reset,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Intent::SelectImage => "select image",
            Intent::Proceed => "proceed",
            Intent::SelectAnswer => "select answer",
            Intent::Advance => "advance",
            Intent::Reset => "reset",
        };
        f.write_str(label)
    }
}

//
// ─── TICKETS ──────────────────────────────────────────────────────────────────
//

/// Proof that the session entered `Analyzing`. Carries the call's input and is
/// consumed by exactly one completion.
#[derive(Debug)]
pub struct AnalysisTicket {
    session_id: SessionId,
    image: UploadedImage,
}

impl AnalysisTicket {
    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    #[must_use]
    pub fn image(&self) -> &UploadedImage {
        &self.image
    }
}

/// Proof that the session entered `GeneratingQuiz`.
#[derive(Debug)]
pub struct QuizTicket {
    session_id: SessionId,
    concept: String,
    subject: String,
}

impl QuizTicket {
    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    #[must_use]
    pub fn concept(&self) -> &str {
        &self.concept
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }
}

//
// ─── PRACTICE OUTCOMES ────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Incorrect { correct_answer: String },
    /// The question was already answered; nothing changed.
    AlreadyAnswered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizResult {
    pub score: u32,
    pub total: u32,
    pub completed_at: DateTime<Utc>,
}

impl QuizResult {
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.score == self.total
    }

    /// Whole-number percentage, rounded down.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        self.score * 100 / self.total
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Next { index: usize },
    Finished(QuizResult),
}

//
// ─── SESSION ──────────────────────────────────────────────────────────────────
//

/// State of one upload-to-result cycle.
///
/// All mutation goes through the transition methods below; each checks the
/// current step first and leaves the session untouched when it rejects.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    step: Step,
    started_at: DateTime<Utc>,
    image: Option<UploadedImage>,
    analysis: Option<AnalysisResult>,
    questions: Vec<PracticeQuestion>,
    score: u32,
    current_index: usize,
    selected_option: Option<String>,
    result: Option<QuizResult>,
}

impl Session {
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            id: SessionId::new_v4(),
            step: Step::Upload,
            started_at: now,
            image: None,
            analysis: None,
            questions: Vec::new(),
            score: 0,
            current_index: 0,
            selected_option: None,
            result: None,
        }
    }

    fn require_step(&self, step: Step, intent: Intent) -> Result<(), SessionError> {
        if self.step == step && step.accepts(intent) {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                step: self.step,
                intent,
            })
        }
    }

    fn require_busy(&self, step: Step, session_id: SessionId) -> Result<(), SessionError> {
        if session_id != self.id || self.step != step {
            return Err(SessionError::StaleTicket);
        }
        Ok(())
    }

    // ── Upload → Analyzing → Review | Upload ──────────────────────────────────

    /// Store the picked image and enter `Analyzing`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless the session is on `Upload`.
    pub fn begin_analysis(&mut self, image: UploadedImage) -> Result<AnalysisTicket, SessionError> {
        self.require_step(Step::Upload, Intent::SelectImage)?;
        self.image = Some(image.clone());
        self.step = Step::Analyzing;
        Ok(AnalysisTicket {
            session_id: self.id,
            image,
        })
    }

    /// # Errors
    ///
    /// Returns `SessionError::StaleTicket` if the session is no longer analyzing this ticket.
    pub fn complete_analysis(
        &mut self,
        ticket: AnalysisTicket,
        analysis: AnalysisResult,
    ) -> Result<(), SessionError> {
        self.require_busy(Step::Analyzing, ticket.session_id)?;
        self.analysis = Some(analysis);
        self.step = Step::Review;
        Ok(())
    }

    /// Roll back to `Upload`, discarding the image.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::StaleTicket` if the session is no longer analyzing this ticket.
    pub fn fail_analysis(&mut self, ticket: AnalysisTicket) -> Result<(), SessionError> {
        self.require_busy(Step::Analyzing, ticket.session_id)?;
        self.image = None;
        self.step = Step::Upload;
        Ok(())
    }

    // ── Review → GeneratingQuiz → Practice | Review ───────────────────────────

    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless the session is on `Review`.
    pub fn begin_quiz(&mut self) -> Result<QuizTicket, SessionError> {
        self.require_step(Step::Review, Intent::Proceed)?;
        let Some(analysis) = self.analysis.as_ref() else {
            return Err(SessionError::InvalidTransition {
                step: self.step,
                intent: Intent::Proceed,
            });
        };
        let ticket = QuizTicket {
            session_id: self.id,
            concept: analysis.core_concept.clone(),
            subject: analysis.subject.clone(),
        };
        self.step = Step::GeneratingQuiz;
        Ok(ticket)
    }

    /// Store the questions and start practice at the first one with a zero score.
    ///
    /// An empty list counts as a failed generation: the session returns to
    /// `Review` and `SessionError::EmptyQuiz` is reported.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::StaleTicket` or `SessionError::EmptyQuiz`.
    pub fn complete_quiz(
        &mut self,
        ticket: QuizTicket,
        questions: Vec<PracticeQuestion>,
    ) -> Result<(), SessionError> {
        self.require_busy(Step::GeneratingQuiz, ticket.session_id)?;
        if questions.is_empty() {
            self.step = Step::Review;
            return Err(SessionError::EmptyQuiz);
        }
        self.questions = questions;
        self.score = 0;
        self.current_index = 0;
        self.selected_option = None;
        self.result = None;
        self.step = Step::Practice;
        Ok(())
    }

    /// Roll back to `Review`, keeping the analysis.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::StaleTicket` if the session is no longer generating for this ticket.
    pub fn fail_quiz(&mut self, ticket: QuizTicket) -> Result<(), SessionError> {
        self.require_busy(Step::GeneratingQuiz, ticket.session_id)?;
        self.step = Step::Review;
        Ok(())
    }

    // ── Practice ──────────────────────────────────────────────────────────────

    /// Lock in an answer for the current question.
    ///
    /// The score moves here and only here, on the first selection. Later
    /// selections on the same question return `AnswerOutcome::AlreadyAnswered`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside `Practice` and
    /// `SessionError::UnknownOption` for a string that is not an option.
    pub fn select_answer(&mut self, option: &str) -> Result<AnswerOutcome, SessionError> {
        self.require_step(Step::Practice, Intent::SelectAnswer)?;
        if self.selected_option.is_some() {
            return Ok(AnswerOutcome::AlreadyAnswered);
        }
        let question = self
            .questions
            .get(self.current_index)
            .ok_or(SessionError::InvalidTransition {
                step: self.step,
                intent: Intent::SelectAnswer,
            })?;
        if !question.has_option(option) {
            return Err(SessionError::UnknownOption(option.to_string()));
        }

        let outcome = if question.is_correct(option) {
            self.score = self.score.saturating_add(1);
            AnswerOutcome::Correct
        } else {
            AnswerOutcome::Incorrect {
                correct_answer: question.correct_answer().to_string(),
            }
        };
        self.selected_option = Some(option.to_string());
        Ok(outcome)
    }

    /// Move past an answered question, finishing the quiz after the last one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside `Practice` and
    /// `SessionError::NotAnswered` before the current question has an answer.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<AdvanceOutcome, SessionError> {
        self.require_step(Step::Practice, Intent::Advance)?;
        if self.selected_option.is_none() {
            return Err(SessionError::NotAnswered);
        }

        if self.is_last_question() {
            let result = QuizResult {
                score: self.score,
                total: u32::try_from(self.questions.len()).unwrap_or(u32::MAX),
                completed_at: now,
            };
            self.result = Some(result);
            self.step = Step::Success;
            return Ok(AdvanceOutcome::Finished(result));
        }

        self.current_index += 1;
        self.selected_option = None;
        Ok(AdvanceOutcome::Next {
            index: self.current_index,
        })
    }

    // ── Success → Upload ──────────────────────────────────────────────────────

    /// Replace the whole session with a fresh one on `Upload`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless the session is on `Success` or `Error`.
    pub fn reset(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        if !self.step.accepts(Intent::Reset) {
            return Err(SessionError::InvalidTransition {
                step: self.step,
                intent: Intent::Reset,
            });
        }
        *self = Self::new(now);
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn step(&self) -> Step {
        self.step
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.step.is_busy()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn image(&self) -> Option<&UploadedImage> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    #[must_use]
    pub fn questions(&self) -> &[PracticeQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&PracticeQuestion> {
        if self.step != Step::Practice {
            return None;
        }
        self.questions.get(self.current_index)
    }

    #[must_use]
    pub fn selected_option(&self) -> Option<&str> {
        self.selected_option.as_deref()
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 >= self.questions.len()
    }

    #[must_use]
    pub fn result(&self) -> Option<QuizResult> {
        self.result
    }
}
