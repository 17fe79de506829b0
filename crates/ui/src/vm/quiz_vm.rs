use tutor_core::model::Session;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionState {
    /// Not answered yet; clickable.
    Open,
    /// The correct answer, revealed after any selection.
    Correct,
    /// The student's wrong pick.
    Wrong,
    /// Neither picked nor correct.
    Dimmed,
}

impl OptionState {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Open => "quiz-option",
            Self::Correct => "quiz-option quiz-option--correct",
            Self::Wrong => "quiz-option quiz-option--wrong",
            Self::Dimmed => "quiz-option quiz-option--dimmed",
        }
    }

    #[must_use]
    pub fn mark(self) -> Option<&'static str> {
        match self {
            Self::Correct => Some("✓"),
            Self::Wrong => Some("✗"),
            Self::Open | Self::Dimmed => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizOptionVm {
    pub label: String,
    pub state: OptionState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizVm {
    pub number: usize,
    pub total: usize,
    pub progress_label: String,
    pub progress_percent: u32,
    pub question: String,
    pub options: Vec<QuizOptionVm>,
    pub explanation: Option<String>,
    pub answered: bool,
    pub next_label: &'static str,
}

/// Current question of a session in `Practice`, or `None` otherwise.
#[must_use]
pub fn map_quiz(session: &Session) -> Option<QuizVm> {
    let question = session.current_question()?;
    let total = session.questions().len();
    let number = session.current_index() + 1;
    let selected = session.selected_option();

    let options = question
        .options()
        .iter()
        .map(|option| {
            let state = match selected {
                None => OptionState::Open,
                Some(_) if question.is_correct(option) => OptionState::Correct,
                Some(pick) if pick == option => OptionState::Wrong,
                Some(_) => OptionState::Dimmed,
            };
            QuizOptionVm {
                label: option.clone(),
                state,
            }
        })
        .collect();

    let progress_percent = u32::try_from(number * 100 / total.max(1)).unwrap_or(100);

    Some(QuizVm {
        number,
        total,
        progress_label: format!("{number} / {total}"),
        progress_percent,
        question: question.question().to_string(),
        options,
        explanation: selected.map(|_| question.explanation().to_string()),
        answered: selected.is_some(),
        next_label: if session.is_last_question() {
            "查看结果"
        } else {
            "下一题"
        },
    })
}
