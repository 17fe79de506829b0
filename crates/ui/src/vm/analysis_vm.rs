use tutor_core::model::{AnalysisResult, UploadedImage};

use crate::vm::markdown_to_html;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisVm {
    pub photo_url: Option<String>,
    pub subject: String,
    pub core_concept: String,
    pub mistake_html: String,
    pub solution_html: String,
    pub encouragement: String,
}

#[must_use]
pub fn map_analysis(analysis: &AnalysisResult, image: Option<&UploadedImage>) -> AnalysisVm {
    AnalysisVm {
        photo_url: image.map(UploadedImage::data_url),
        subject: analysis.subject.trim().to_string(),
        core_concept: analysis.core_concept.trim().to_string(),
        mistake_html: markdown_to_html(&analysis.mistake_analysis),
        solution_html: markdown_to_html(&analysis.correct_solution),
        encouragement: analysis.encouragement.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutor_core::model::MediaType;

    fn analysis() -> AnalysisResult {
        AnalysisResult {
            subject: " English ".into(),
            core_concept: "过去完成时".into(),
            mistake_analysis: "把 **had gone** 写成了 went".into(),
            correct_solution: "She had gone.\n她已经走了。".into(),
            encouragement: "加油！".into(),
        }
    }

    #[test]
    fn maps_fields_and_renders_markdown() {
        let image = UploadedImage::new(vec![1, 2, 3], MediaType::Png).unwrap();
        let vm = map_analysis(&analysis(), Some(&image));
        assert_eq!(vm.subject, "English");
        assert_eq!(vm.photo_url.as_deref(), Some("data:image/png;base64,AQID"));
        assert!(vm.mistake_html.contains("<strong>had gone</strong>"));
        assert!(vm.solution_html.contains("<br>"));
    }

    #[test]
    fn missing_photo_is_allowed() {
        let vm = map_analysis(&analysis(), None);
        assert!(vm.photo_url.is_none());
    }
}
