mod ollama;
mod prompt;

pub use ollama::{ConnectionReport, OllamaProvider};
pub use prompt::{
    inject_advice, inject_foods, inject_recipe_request, ADVICE_PROMPT, ANALYSIS_PROMPT,
    ANALYSIS_SYSTEM_PROMPT, RECIPE_PROMPT, RECIPE_SYSTEM_PROMPT,
};

use crate::error::AssistantError;
use async_trait::async_trait;
use std::fmt;

/// Availability of a text generation service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceStatus {
    /// Reachable with the configured model installed
    Ready,
    /// Not reachable, or reachable without the model
    Unavailable(String),
    /// Reachable but answering with errors
    Failed(String),
}

impl ServiceStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, ServiceStatus::Ready)
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceStatus::Ready => write!(f, "ready"),
            ServiceStatus::Unavailable(reason) => write!(f, "unavailable: {}", reason),
            ServiceStatus::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// A service that turns a prompt into free text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Provider name (e.g., "ollama")
    fn name(&self) -> &str;

    /// Whether the service can currently generate
    async fn status(&self) -> ServiceStatus;

    /// Generate a completion for `prompt`, with an optional system prompt
    async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AssistantError>;
}
