/// Which language the student reads natively and which subject is taught as a
/// foreign language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageProfile {
    native: String,
    foreign: String,
    /// Subject labels (lowercase) that denote the foreign-language subject.
    foreign_subject_labels: Vec<String>,
}

impl Default for LanguageProfile {
    fn default() -> Self {
        Self::new("Simplified Chinese", "English", ["english", "英语"])
    }
}

impl LanguageProfile {
    #[must_use]
    pub fn new(
        native: impl Into<String>,
        foreign: impl Into<String>,
        foreign_subject_labels: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            native: native.into(),
            foreign: foreign.into(),
            foreign_subject_labels: foreign_subject_labels
                .into_iter()
                .map(|label| label.into().to_lowercase())
                .filter(|label| !label.trim().is_empty())
                .collect(),
        }
    }

    #[must_use]
    pub fn native(&self) -> &str {
        &self.native
    }

    #[must_use]
    pub fn foreign(&self) -> &str {
        &self.foreign
    }

    /// True when `subject` names the foreign-language subject. Matching is a
    /// case-insensitive substring test against each known label.
    #[must_use]
    pub fn is_foreign_subject(&self, subject: &str) -> bool {
        let subject = subject.to_lowercase();
        self.foreign_subject_labels
            .iter()
            .any(|label| subject.contains(label.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_detects_english_in_both_spellings() {
        let profile = LanguageProfile::default();
        assert!(profile.is_foreign_subject("English"));
        assert!(profile.is_foreign_subject("ENGLISH grammar"));
        assert!(profile.is_foreign_subject("英语"));
        assert!(profile.is_foreign_subject("初中英语"));
        assert!(!profile.is_foreign_subject("Math"));
        assert!(!profile.is_foreign_subject("语文"));
    }

    #[test]
    fn blank_labels_never_match_everything() {
        let profile = LanguageProfile::new("German", "French", ["", "french"]);
        assert!(!profile.is_foreign_subject("Physics"));
        assert!(profile.is_foreign_subject("French"));
    }
}
