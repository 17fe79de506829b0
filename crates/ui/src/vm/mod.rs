mod analysis_vm;
mod markdown_vm;
mod quiz_vm;
mod result_vm;
mod session_vm;
mod time_fmt;

pub use analysis_vm::{AnalysisVm, map_analysis};
pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use quiz_vm::{OptionState, QuizOptionVm, QuizVm, map_quiz};
pub use result_vm::{ResultTier, ResultVm, map_result};
pub use session_vm::{LoadingKind, Screen, TutorIntent, map_screen};
pub use time_fmt::{format_datetime, format_elapsed, format_local_time};
