use dioxus::prelude::*;

use crate::vm::TutorIntent;

#[component]
pub fn ErrorScreen(on_intent: EventHandler<TutorIntent>) -> Element {
    rsx! {
        section { class: "card error-screen",
            h2 { "出错了" }
            p { "刚才的操作没有完成，我们从头再来吧。" }
            button {
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| on_intent.call(TutorIntent::Reset),
                "回到首页"
            }
        }
    }
}
