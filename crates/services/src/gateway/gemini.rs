use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use tutor_core::model::{AnalysisResult, PracticeQuestion, UploadedImage};

use super::wire::{
    ApiErrorBody, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};
use super::{TutorGateway, parse, prompts, schema};
use crate::config::GatewayConfig;
use crate::error::{ConfigError, GatewayError};

const ANALYSIS_TEMPERATURE: f32 = 0.4;
const QUIZ_TEMPERATURE: f32 = 0.8;

/// `TutorGateway` backed by the Gemini `generateContent` REST endpoint.
#[derive(Clone)]
pub struct GeminiGateway {
    client: Client,
    config: GatewayConfig,
}

impl GeminiGateway {
    /// Build a gateway whose requests give up after `config.timeout`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::HttpClient` if the HTTP client cannot be built.
    pub fn new(config: GatewayConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ConfigError::HttpClient)?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    async fn generate(
        &self,
        parts: Vec<Part>,
        schema: Value,
        temperature: f32,
    ) -> Result<String, GatewayError> {
        let payload = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts,
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
                temperature,
            },
        };

        let response = self
            .client
            .post(self.config.generate_content_url())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|err| err.error.message)
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("request failed").into());
            warn!(%status, %message, model = %self.config.model, "generateContent failed");
            return Err(GatewayError::HttpStatus { status, message });
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|err| GatewayError::MalformedResponse(err.to_string()))?;

        if let Some(usage) = parsed.usage_metadata {
            debug!(
                model = %self.config.model,
                prompt_tokens = usage.prompt_token_count.unwrap_or(0),
                completion_tokens = usage.candidates_token_count.unwrap_or(0),
                total_tokens = usage.total_token_count.unwrap_or(0),
                "generateContent usage"
            );
        }

        parsed.text().ok_or_else(|| {
            warn!(
                finish_reason = parsed.finish_reason().unwrap_or("none"),
                "generateContent returned no text"
            );
            GatewayError::EmptyResponse
        })
    }
}

#[async_trait]
impl TutorGateway for GeminiGateway {
    async fn analyze(&self, image: &UploadedImage) -> Result<AnalysisResult, GatewayError> {
        let language = &self.config.language;
        debug!(
            media_type = %image.media_type(),
            bytes = image.len(),
            "requesting mistake analysis"
        );
        let parts = vec![
            Part::inline(image.media_type().as_str(), image.to_base64()),
            Part::text(prompts::analysis_prompt(language)),
        ];
        let text = self
            .generate(
                parts,
                schema::analysis_schema(language.native(), language.foreign()),
                ANALYSIS_TEMPERATURE,
            )
            .await?;
        parse::parse_analysis(&text)
    }

    async fn generate_quiz(
        &self,
        concept: &str,
        subject: &str,
    ) -> Result<Vec<PracticeQuestion>, GatewayError> {
        let language = &self.config.language;
        let count = self.config.quiz_size;
        debug!(%concept, %subject, count, "requesting practice quiz");
        let parts = vec![Part::text(prompts::quiz_prompt(
            language, concept, subject, count,
        ))];
        let text = self
            .generate(parts, schema::quiz_schema(language.native()), QUIZ_TEMPERATURE)
            .await?;
        parse::parse_quiz(&text, count)
    }
}
