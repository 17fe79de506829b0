use dioxus::prelude::*;

use crate::vm::LoadingKind;

/// Shown while a gateway call is in flight. Emits nothing.
#[component]
pub fn LoadingScreen(kind: LoadingKind) -> Element {
    rsx! {
        section { class: "loading", role: "status", aria_live: "polite",
            div { class: "loading-spinner", aria_hidden: "true" }
            h2 { class: "loading-title", "{kind.title()}" }
            p { class: "loading-hint", "老师的大脑正在飞速运转..." }
        }
    }
}
