mod error;
mod header;
mod loading;
mod notice;
mod quiz;
mod result;
mod review;
mod state;
mod tutor;
mod upload;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use error::ErrorScreen;
pub use header::Header;
pub use loading::LoadingScreen;
pub use notice::NoticeBanner;
pub use quiz::QuizScreen;
pub use result::ResultScreen;
pub use review::ReviewScreen;
pub use state::ViewError;
pub use tutor::TutorView;
pub use upload::UploadScreen;
