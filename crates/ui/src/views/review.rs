use dioxus::prelude::*;

use crate::vm::{AnalysisVm, TutorIntent};

#[component]
pub fn ReviewScreen(analysis: AnalysisVm, on_intent: EventHandler<TutorIntent>) -> Element {
    rsx! {
        section { class: "review",
            div { class: "review-grid",
                div { class: "review-column",
                    if let Some(url) = analysis.photo_url.as_ref() {
                        figure { class: "card review-photo",
                            img { src: "{url}", alt: "错题照片" }
                        }
                    }
                    div { class: "card review-concept",
                        span { class: "review-subject", "{analysis.subject}" }
                        h3 { "核心知识点" }
                        p { class: "review-concept-text", "{analysis.core_concept}" }
                    }
                }
                div { class: "review-column",
                    div { class: "card review-encouragement",
                        h3 { "🌟 老师的话:" }
                        p { "“{analysis.encouragement}”" }
                    }
                    div { class: "card review-mistake",
                        h3 { "为什么会错?" }
                        div { class: "markdown", dangerous_inner_html: "{analysis.mistake_html}" }
                    }
                    div { class: "card review-solution",
                        h3 { "正确解法" }
                        div { class: "markdown", dangerous_inner_html: "{analysis.solution_html}" }
                    }
                }
            }
            div { class: "floating-action",
                button {
                    class: "btn btn-primary btn-large",
                    id: "review-proceed",
                    r#type: "button",
                    onclick: move |_| on_intent.call(TutorIntent::Proceed),
                    "我学会了，去练习！ →"
                }
            }
        }
    }
}
