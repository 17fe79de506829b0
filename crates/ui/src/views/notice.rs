use dioxus::prelude::*;
use services::{Notice, Stage};

fn notice_hint(notice: &Notice) -> &'static str {
    if notice.timed_out {
        "AI 老师回复超时了，可能是网络不太稳定。"
    } else if notice.transport_failure {
        "连接 AI 老师失败，请检查网络后再试一次。"
    } else if notice.stage == Stage::Analysis {
        "AI 老师没看清楚题目，换一张更清晰的照片试试。"
    } else {
        "AI 老师出的题不完整，再点一次试试。"
    }
}

#[component]
pub fn NoticeBanner(notice: Notice, on_dismiss: EventHandler<()>) -> Element {
    let hint = notice_hint(&notice);
    rsx! {
        div { class: "notice", role: "alert",
            div { class: "notice-body",
                strong { class: "notice-title", "{notice.message()}" }
                p { class: "notice-hint", "{hint}" }
            }
            button {
                class: "notice-dismiss",
                r#type: "button",
                aria_label: "关闭",
                onclick: move |_| on_dismiss.call(()),
                "×"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(timed_out: bool, transport_failure: bool) -> Notice {
        Notice {
            stage: Stage::Analysis,
            detail: String::new(),
            timed_out,
            transport_failure,
        }
    }

    #[test]
    fn hint_follows_failure_kind() {
        assert!(notice_hint(&notice(true, true)).contains("超时"));
        assert!(notice_hint(&notice(false, true)).contains("网络"));
        assert!(notice_hint(&notice(false, false)).contains("照片"));

        let quiz = Notice {
            stage: Stage::Quiz,
            ..notice(false, false)
        };
        assert!(notice_hint(&quiz).contains("再点一次"));
    }
}
