use dioxus::prelude::*;

use crate::vm::{ResultTier, ResultVm, TutorIntent};

#[component]
pub fn ResultScreen(result: ResultVm, on_intent: EventHandler<TutorIntent>) -> Element {
    let perfect = result.tier == ResultTier::Perfect;
    let trophy_class = if perfect {
        "result-trophy result-trophy--perfect"
    } else {
        "result-trophy"
    };
    rsx! {
        section { class: "result",
            div { class: "{trophy_class}",
                if perfect {
                    span { class: "result-ribbon", "太棒了！全对！" }
                }
                span { aria_hidden: "true", "🏆" }
            }
            h2 { class: "result-title", "{result.tier.title()}" }
            p { class: "result-score",
                "你答对了 "
                span { class: "result-score-value", "{result.score}" }
                " / {result.total} 道题"
            }
            p { class: "result-percent", "正确率 {result.percent_label}" }
            div { class: "card result-message",
                p { "{result.tier.message()}" }
            }
            p { class: "result-time",
                "完成时间 "
                time { datetime: "{result.completed_iso}", "{result.completed_label}" }
                span { class: "result-elapsed", " · 用时 {result.elapsed_label}" }
            }
            button {
                class: "btn btn-primary",
                id: "result-reset",
                r#type: "button",
                onclick: move |_| on_intent.call(TutorIntent::Reset),
                "再练一道错题"
            }
        }
    }
}
