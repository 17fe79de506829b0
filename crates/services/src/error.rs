//! Shared error types for the services crate.

use thiserror::Error;

use tutor_core::model::SessionError;

/// Errors emitted by a `TutorGateway`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GatewayError {
    #[error("the AI endpoint returned an empty response")]
    EmptyResponse,
    #[error("the AI endpoint returned a malformed response: {0}")]
    MalformedResponse(String),
    #[error("the AI endpoint answered with status {status}: {message}")]
    HttpStatus {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("the AI endpoint could not be reached: {0}")]
    Transport(reqwest::Error),
    #[error("the AI endpoint did not answer in time")]
    Timeout,
}

impl GatewayError {
    /// Network or endpoint-level failure, as opposed to a bad payload.
    #[must_use]
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            Self::HttpStatus { .. } | Self::Transport(_) | Self::Timeout
        )
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err)
        }
    }
}

/// Errors raised while reading gateway configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("no API key configured (set TUTOR_API_KEY)")]
    MissingApiKey,
    #[error("invalid value for {var}: {raw:?}")]
    InvalidValue { var: &'static str, raw: String },
    #[error(transparent)]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(reqwest::Error),
}

/// Errors emitted by `WorkflowService`.
///
/// Gateway failures never appear here: they are absorbed into a rollback and
/// reported through `WorkflowOutcome`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WorkflowError {
    #[error(transparent)]
    Session(#[from] SessionError),
}
