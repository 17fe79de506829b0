use dioxus::prelude::*;

use crate::vm::{OptionState, QuizVm, TutorIntent};

#[component]
pub fn QuizScreen(quiz: QuizVm, on_intent: EventHandler<TutorIntent>) -> Element {
    let options = quiz.options.iter().map(|option| {
        let label = option.label.clone();
        let state = option.state;
        rsx! {
            button {
                class: "{state.class()}",
                r#type: "button",
                disabled: state != OptionState::Open,
                onclick: move |_| on_intent.call(TutorIntent::SelectAnswer(label.clone())),
                span { class: "quiz-option-label", "{option.label}" }
                if let Some(mark) = state.mark() {
                    span { class: "quiz-option-mark", "{mark}" }
                }
            }
        }
    });

    rsx! {
        section { class: "quiz",
            div { class: "quiz-progress",
                div { class: "quiz-progress-labels",
                    span { "挑战进度" }
                    span { class: "quiz-progress-count", "{quiz.progress_label}" }
                }
                div { class: "quiz-progress-track",
                    div {
                        class: "quiz-progress-fill",
                        style: "width: {quiz.progress_percent}%",
                    }
                }
            }
            div { class: "card quiz-card",
                span { class: "quiz-number", "第 {quiz.number} 题" }
                h3 { class: "quiz-question", "{quiz.question}" }
                div { class: "quiz-options", {options} }
            }
            if let Some(explanation) = quiz.explanation.as_ref() {
                div { class: "card quiz-explanation",
                    h4 { "💡 解析:" }
                    p { "{explanation}" }
                }
            }
            if quiz.answered {
                div { class: "floating-action",
                    button {
                        class: "btn btn-success btn-large",
                        id: "quiz-next",
                        r#type: "button",
                        onclick: move |_| on_intent.call(TutorIntent::Advance),
                        "{quiz.next_label}"
                    }
                }
            }
        }
    }
}
