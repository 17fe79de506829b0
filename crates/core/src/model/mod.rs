mod analysis;
mod ids;
mod image;
mod language;
mod question;
mod session;

pub use analysis::AnalysisResult;
pub use ids::{ParseIdError, QuestionId, SessionId};
pub use image::{ImageError, MAX_INLINE_IMAGE_BYTES, MediaType, UploadedImage};
pub use language::LanguageProfile;
pub use question::{OPTIONS_PER_QUESTION, PracticeQuestion, QuestionDraft, QuestionError};
pub use session::{
    AdvanceOutcome, AnalysisTicket, AnswerOutcome, Intent, QuizResult, QuizTicket, Session,
    SessionError, Step,
};
