use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use tutor_core::model::{AnalysisResult, MediaType, PracticeQuestion, UploadedImage};

use super::TutorGateway;
use crate::error::GatewayError;

/// A request observed by [`ScriptedGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    Analyze {
        media_type: MediaType,
        bytes: usize,
    },
    GenerateQuiz {
        concept: String,
        subject: String,
    },
}

#[derive(Default)]
struct Script {
    analyses: VecDeque<Result<AnalysisResult, GatewayError>>,
    quizzes: VecDeque<Result<Vec<PracticeQuestion>, GatewayError>>,
    calls: Vec<GatewayCall>,
}

/// In-memory gateway that replays queued responses and records every call.
///
/// A call with nothing queued fails with `GatewayError::EmptyResponse`.
#[derive(Clone, Default)]
pub struct ScriptedGateway {
    script: Arc<Mutex<Script>>,
}

impl ScriptedGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_script<T>(&self, f: impl FnOnce(&mut Script) -> T) -> T {
        let mut guard = self.script.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    pub fn push_analysis(&self, result: Result<AnalysisResult, GatewayError>) {
        self.with_script(|script| script.analyses.push_back(result));
    }

    pub fn push_quiz(&self, result: Result<Vec<PracticeQuestion>, GatewayError>) {
        self.with_script(|script| script.quizzes.push_back(result));
    }

    #[must_use]
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.with_script(|script| script.calls.clone())
    }

    #[must_use]
    pub fn analyze_calls(&self) -> usize {
        self.with_script(|script| {
            script
                .calls
                .iter()
                .filter(|call| matches!(call, GatewayCall::Analyze { .. }))
                .count()
        })
    }

    #[must_use]
    pub fn quiz_calls(&self) -> usize {
        self.with_script(|script| {
            script
                .calls
                .iter()
                .filter(|call| matches!(call, GatewayCall::GenerateQuiz { .. }))
                .count()
        })
    }
}

#[async_trait]
impl TutorGateway for ScriptedGateway {
    async fn analyze(&self, image: &UploadedImage) -> Result<AnalysisResult, GatewayError> {
        self.with_script(|script| {
            script.calls.push(GatewayCall::Analyze {
                media_type: image.media_type(),
                bytes: image.len(),
            });
            script
                .analyses
                .pop_front()
                .unwrap_or(Err(GatewayError::EmptyResponse))
        })
    }

    async fn generate_quiz(
        &self,
        concept: &str,
        subject: &str,
    ) -> Result<Vec<PracticeQuestion>, GatewayError> {
        self.with_script(|script| {
            script.calls.push(GatewayCall::GenerateQuiz {
                concept: concept.to_string(),
                subject: subject.to_string(),
            });
            script
                .quizzes
                .pop_front()
                .unwrap_or(Err(GatewayError::EmptyResponse))
        })
    }
}
