use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use tutor_core::model::{
    AdvanceOutcome, AnalysisResult, AnalysisTicket, AnswerOutcome, PracticeQuestion, QuizTicket,
    Session, SessionError, UploadedImage,
};

use crate::Clock;
use crate::error::{GatewayError, WorkflowError};
use crate::gateway::TutorGateway;

/// Which gateway call a notice is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Analysis,
    Quiz,
}

/// User-facing report of a failed gateway call after the session rolled back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub stage: Stage,
    pub detail: String,
    pub timed_out: bool,
    /// The endpoint was unreachable or refused the request, as opposed to a bad payload.
    pub transport_failure: bool,
}

impl Notice {
    fn from_gateway(stage: Stage, err: &GatewayError) -> Self {
        Self {
            stage,
            detail: err.to_string(),
            timed_out: matches!(err, GatewayError::Timeout),
            transport_failure: err.is_transport_failure(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &'static str {
        match self.stage {
            Stage::Analysis => "分析失败，请重试！",
            Stage::Quiz => "题目生成失败，请重试！",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), self.detail)
    }
}

/// How a gateway-backed transition ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    /// The session moved forward (Review or Practice).
    Completed,
    /// The call failed and the session went back one step.
    RolledBack(Notice),
}

impl WorkflowOutcome {
    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            Self::Completed => None,
            Self::RolledBack(notice) => Some(notice),
        }
    }
}

/// Gateway result paired with the ticket that started the call.
#[derive(Debug)]
pub struct AnalysisCompletion {
    ticket: AnalysisTicket,
    result: Result<AnalysisResult, GatewayError>,
}

#[derive(Debug)]
pub struct QuizCompletion {
    ticket: QuizTicket,
    result: Result<Vec<PracticeQuestion>, GatewayError>,
}

/// Drives a `Session` through its steps and owns the gateway calls between them.
///
/// Each call is split in three so a UI can release the session while the
/// request runs: `start_*` enters the busy step, `run_*` awaits the gateway
/// without touching the session, `finish_*` applies the result. `submit_image`
/// and `start_practice` chain the three for callers that can hold the session.
#[derive(Clone)]
pub struct WorkflowService {
    gateway: Arc<dyn TutorGateway>,
    clock: Clock,
}

impl WorkflowService {
    #[must_use]
    pub fn new(gateway: Arc<dyn TutorGateway>, clock: Clock) -> Self {
        Self { gateway, clock }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Fresh session stamped with the service clock.
    #[must_use]
    pub fn new_session(&self) -> Session {
        let session = Session::new(self.clock.now());
        info!(session_id = %session.id(), step = %session.step(), "session started");
        session
    }

    // ── Analysis ──────────────────────────────────────────────────────────────

    /// # Errors
    ///
    /// Returns `WorkflowError::Session` unless the session is on `Upload`.
    pub fn start_analysis(
        &self,
        session: &mut Session,
        image: UploadedImage,
    ) -> Result<AnalysisTicket, WorkflowError> {
        let ticket = session.begin_analysis(image).inspect_err(|err| {
            warn!(session_id = %session.id(), error = %err, "image rejected");
        })?;
        info!(
            session_id = %session.id(),
            step = %session.step(),
            media_type = %ticket.image().media_type(),
            bytes = ticket.image().len(),
            "analysis started"
        );
        Ok(ticket)
    }

    pub async fn run_analysis(&self, ticket: AnalysisTicket) -> AnalysisCompletion {
        let result = self.gateway.analyze(ticket.image()).await;
        AnalysisCompletion { ticket, result }
    }

    /// Apply an analysis result, rolling back to `Upload` on failure.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Session` if the ticket no longer matches the session.
    pub fn finish_analysis(
        &self,
        session: &mut Session,
        completion: AnalysisCompletion,
    ) -> Result<WorkflowOutcome, WorkflowError> {
        let AnalysisCompletion { ticket, result } = completion;
        match result {
            Ok(analysis) => {
                let subject = analysis.subject.clone();
                session.complete_analysis(ticket, analysis)?;
                info!(session_id = %session.id(), step = %session.step(), %subject, "analysis ready");
                Ok(WorkflowOutcome::Completed)
            }
            Err(err) => {
                session.fail_analysis(ticket)?;
                warn!(session_id = %session.id(), step = %session.step(), error = %err, "analysis failed");
                Ok(WorkflowOutcome::RolledBack(Notice::from_gateway(
                    Stage::Analysis,
                    &err,
                )))
            }
        }
    }

    /// Upload → Analyzing → Review | Upload in one call.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Session` unless the session is on `Upload`.
    pub async fn submit_image(
        &self,
        session: &mut Session,
        image: UploadedImage,
    ) -> Result<WorkflowOutcome, WorkflowError> {
        let ticket = self.start_analysis(session, image)?;
        let completion = self.run_analysis(ticket).await;
        self.finish_analysis(session, completion)
    }

    // ── Quiz ──────────────────────────────────────────────────────────────────

    /// # Errors
    ///
    /// Returns `WorkflowError::Session` unless the session is on `Review`.
    pub fn start_quiz(&self, session: &mut Session) -> Result<QuizTicket, WorkflowError> {
        let ticket = session.begin_quiz()?;
        info!(
            session_id = %session.id(),
            step = %session.step(),
            concept = %ticket.concept(),
            subject = %ticket.subject(),
            "quiz generation started"
        );
        Ok(ticket)
    }

    pub async fn run_quiz(&self, ticket: QuizTicket) -> QuizCompletion {
        let result = self
            .gateway
            .generate_quiz(ticket.concept(), ticket.subject())
            .await;
        QuizCompletion { ticket, result }
    }

    /// Apply generated questions, rolling back to `Review` on failure.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Session` if the ticket no longer matches the session.
    pub fn finish_quiz(
        &self,
        session: &mut Session,
        completion: QuizCompletion,
    ) -> Result<WorkflowOutcome, WorkflowError> {
        let QuizCompletion { ticket, result } = completion;
        let questions = match result {
            Ok(questions) => questions,
            Err(err) => {
                session.fail_quiz(ticket)?;
                warn!(session_id = %session.id(), step = %session.step(), error = %err, "quiz generation failed");
                return Ok(WorkflowOutcome::RolledBack(Notice::from_gateway(
                    Stage::Quiz,
                    &err,
                )));
            }
        };

        let count = questions.len();
        match session.complete_quiz(ticket, questions) {
            Ok(()) => {
                info!(session_id = %session.id(), step = %session.step(), count, "practice started");
                Ok(WorkflowOutcome::Completed)
            }
            Err(SessionError::EmptyQuiz) => {
                warn!(session_id = %session.id(), step = %session.step(), "quiz generation returned no questions");
                Ok(WorkflowOutcome::RolledBack(Notice {
                    stage: Stage::Quiz,
                    detail: SessionError::EmptyQuiz.to_string(),
                    timed_out: false,
                    transport_failure: false,
                }))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Review → GeneratingQuiz → Practice | Review in one call.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Session` unless the session is on `Review`.
    pub async fn start_practice(
        &self,
        session: &mut Session,
    ) -> Result<WorkflowOutcome, WorkflowError> {
        let ticket = self.start_quiz(session)?;
        let completion = self.run_quiz(ticket).await;
        self.finish_quiz(session, completion)
    }

    // ── Practice ──────────────────────────────────────────────────────────────

    /// # Errors
    ///
    /// Returns `WorkflowError::Session` outside `Practice` or for an unknown option.
    pub fn select_answer(
        &self,
        session: &mut Session,
        option: &str,
    ) -> Result<AnswerOutcome, WorkflowError> {
        let outcome = session.select_answer(option)?;
        info!(
            session_id = %session.id(),
            question = session.current_index() + 1,
            score = session.score(),
            ?outcome,
            "answer selected"
        );
        Ok(outcome)
    }

    /// # Errors
    ///
    /// Returns `WorkflowError::Session` outside `Practice` or before an answer.
    pub fn advance(&self, session: &mut Session) -> Result<AdvanceOutcome, WorkflowError> {
        let outcome = session.advance(self.clock.now())?;
        match outcome {
            AdvanceOutcome::Next { index } => {
                info!(session_id = %session.id(), question = index + 1, "next question");
            }
            AdvanceOutcome::Finished(result) => {
                info!(
                    session_id = %session.id(),
                    step = %session.step(),
                    score = result.score,
                    total = result.total,
                    "quiz finished"
                );
            }
        }
        Ok(outcome)
    }

    /// # Errors
    ///
    /// Returns `WorkflowError::Session` unless the session is on `Success` or `Error`.
    pub fn reset(&self, session: &mut Session) -> Result<(), WorkflowError> {
        let previous = session.id();
        session.reset(self.clock.now())?;
        info!(session_id = %session.id(), %previous, step = %session.step(), "session reset");
        Ok(())
    }
}
