use tutor_core::model::{Intent, Session, Step, UploadedImage};

use crate::vm::{AnalysisVm, QuizVm, ResultVm, map_analysis, map_quiz, map_result};

/// What a screen can ask the workflow to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TutorIntent {
    SelectImage(UploadedImage),
    Proceed,
    SelectAnswer(String),
    Advance,
    Reset,
}

impl TutorIntent {
    #[must_use]
    pub fn kind(&self) -> Intent {
        match self {
            Self::SelectImage(_) => Intent::SelectImage,
            Self::Proceed => Intent::Proceed,
            Self::SelectAnswer(_) => Intent::SelectAnswer,
            Self::Advance => Intent::Advance,
            Self::Reset => Intent::Reset,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadingKind {
    Analyzing,
    GeneratingQuiz,
}

impl LoadingKind {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Analyzing => "AI 老师正在分析错题...",
            Self::GeneratingQuiz => "AI 老师正在准备练习题...",
        }
    }
}

/// One screen per step, already mapped for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Upload,
    Loading(LoadingKind),
    Review(AnalysisVm),
    Quiz(QuizVm),
    Result(ResultVm),
    Error,
}

#[must_use]
pub fn map_screen(session: &Session) -> Screen {
    match session.step() {
        Step::Upload => Screen::Upload,
        Step::Analyzing => Screen::Loading(LoadingKind::Analyzing),
        Step::GeneratingQuiz => Screen::Loading(LoadingKind::GeneratingQuiz),
        Step::Review => session
            .analysis()
            .map_or(Screen::Error, |analysis| {
                Screen::Review(map_analysis(analysis, session.image()))
            }),
        Step::Practice => map_quiz(session).map_or(Screen::Error, Screen::Quiz),
        Step::Success => session
            .result()
            .map_or(Screen::Error, |result| {
                Screen::Result(map_result(&result, session.started_at()))
            }),
        Step::Error => Screen::Error,
    }
}
