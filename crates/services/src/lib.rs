#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod gateway;
pub mod workflow;

pub use tutor_core::Clock;

pub use config::GatewayConfig;
pub use error::{ConfigError, GatewayError, WorkflowError};
pub use gateway::{GatewayCall, GeminiGateway, ScriptedGateway, TutorGateway};
pub use workflow::{
    AnalysisCompletion, Notice, QuizCompletion, Stage, WorkflowOutcome, WorkflowService,
};
