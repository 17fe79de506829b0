use serde::{Deserialize, Serialize};

/// The tutor's reading of a missed question.
///
/// Every field is required on the wire; a payload missing any of them does not
/// deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Short subject label, e.g. "English" or "Math".
    pub subject: String,
    /// The tested concept, in the student's native language.
    pub core_concept: String,
    pub mistake_analysis: String,
    /// Step-by-step correct answer. Bilingual for the foreign-language subject.
    pub correct_solution: String,
    /// Native-language pep talk.
    pub encouragement: String,
}
