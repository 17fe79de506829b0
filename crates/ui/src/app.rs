use dioxus::prelude::*;

use crate::views::TutorView;

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        document::Title { "错题克星" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "页面出错了" }
                        p { "请关闭窗口后重新打开。" }
                        pre { "{errors:?}" }
                    }
                },
                TutorView {}
            }
        }
    }
}
