use dioxus::prelude::*;

#[component]
pub fn Header() -> Element {
    rsx! {
        header { class: "app-header",
            div { class: "app-header-badge",
                span { class: "app-header-icon", aria_hidden: "true", "✨" }
                h1 { class: "app-title",
                    "错题"
                    span { class: "app-title-accent", "克星" }
                }
            }
            div { class: "app-header-cheer", "加油！你可以的！ 🚀" }
        }
    }
}
