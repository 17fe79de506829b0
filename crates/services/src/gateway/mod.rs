//! Boundary to the generative-AI endpoint.

mod gemini;
pub mod parse;
pub mod prompts;
pub mod schema;
mod scripted;
mod wire;

use async_trait::async_trait;
use tutor_core::model::{AnalysisResult, PracticeQuestion, UploadedImage};

use crate::error::GatewayError;

pub use gemini::GeminiGateway;
pub use scripted::{GatewayCall, ScriptedGateway};

/// The two structured requests the tutor makes.
///
/// Implementations perform one round trip per call, without retries or caching.
#[async_trait]
pub trait TutorGateway: Send + Sync {
    /// Read the photo of a missed question and explain the mistake.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` on transport failure, an empty payload, or a payload
    /// that does not match the analysis shape.
    async fn analyze(&self, image: &UploadedImage) -> Result<AnalysisResult, GatewayError>;

    /// Generate practice questions for the concept the student missed.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` on transport failure, an empty payload, or a payload
    /// that does not match the quiz shape.
    async fn generate_quiz(
        &self,
        concept: &str,
        subject: &str,
    ) -> Result<Vec<PracticeQuestion>, GatewayError>;
}
