use dioxus::prelude::*;
use tracing::warn;
use tutor_core::model::UploadedImage;

use crate::views::ViewError;
use crate::vm::TutorIntent;

#[component]
pub fn UploadScreen(on_intent: EventHandler<TutorIntent>) -> Element {
    let error = use_signal(|| None::<ViewError>);

    rsx! {
        section { class: "card upload",
            h2 { class: "upload-title", "拍下你的错题，我们来消灭它！ 📸" }
            label { class: "upload-drop", r#for: "upload-input",
                span { class: "upload-drop-icon", aria_hidden: "true", "📷" }
                span { class: "upload-drop-label", "点击拍照或上传图片" }
                span { class: "upload-drop-hint", "支持 JPG, PNG, WEBP, HEIC 格式" }
            }
            input {
                id: "upload-input",
                class: "upload-input",
                r#type: "file",
                accept: "image/*",
                onchange: move |evt: FormEvent| {
                    let Some(file) = evt.files().into_iter().next() else {
                        return;
                    };
                    let mut error = error;
                    spawn(async move {
                        let name = file.name();
                        let declared = file.content_type();
                        let bytes = match file.read_bytes().await {
                            Ok(bytes) => bytes,
                            Err(err) => {
                                warn!(file = %name, error = %err, "failed to read picked file");
                                error.set(Some(ViewError::UnreadableFile));
                                return;
                            }
                        };
                        match UploadedImage::from_upload(bytes.to_vec(), declared.as_deref(), &name) {
                            Ok(image) => {
                                error.set(None);
                                on_intent.call(TutorIntent::SelectImage(image));
                            }
                            Err(err) => {
                                warn!(file = %name, error = %err, "picked file rejected");
                                error.set(Some(ViewError::from_image(&err)));
                            }
                        }
                    });
                },
            }
            if let Some(err) = error() {
                p { class: "upload-error", role: "alert", "{err.message()}" }
            }
            div { class: "upload-perks",
                span { class: "upload-perk upload-perk--fast", "超级快" }
                span { class: "upload-perk upload-perk--smart", "超智能" }
                span { class: "upload-perk upload-perk--fun", "超有趣" }
            }
        }
    }
}
