use super::{ServiceStatus, TextGenerator};
use crate::config::OllamaConfig;
use crate::error::AssistantError;
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Instant;

const CONNECTION_TEST_PROMPT: &str =
    "Dis bonjour en français et confirme que tu peux créer des recettes";
const CONNECTION_TEST_SYSTEM: &str = "Tu es un chef cuisinier français expert";

/// Outcome of a full connection test against the server
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ConnectionReport {
    pub server_available: bool,
    pub model_available: bool,
    pub test_response: Option<String>,
    pub error: Option<String>,
}

/// Text generation through a local Ollama server
pub struct OllamaProvider {
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
    repeat_penalty: f32,
}

impl OllamaProvider {
    /// Create a provider from configuration
    pub fn new(config: &OllamaConfig) -> Result<Self, AssistantError> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(OllamaProvider {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            top_p: config.top_p,
            max_tokens: config.max_tokens,
            repeat_penalty: config.repeat_penalty,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: String, model: String) -> Self {
        let defaults = OllamaConfig::default();
        OllamaProvider {
            client: Client::new(),
            base_url,
            model,
            temperature: defaults.temperature,
            top_p: defaults.top_p,
            max_tokens: defaults.max_tokens,
            repeat_penalty: defaults.repeat_penalty,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Names of the models installed on the server
    pub async fn list_models(&self) -> Result<Vec<String>, AssistantError> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssistantError::GenerationError(format!(
                "Ollama returned HTTP {} for /api/tags",
                status
            )));
        }

        let body = parse_body(&response.text().await?, "/api/tags")?;
        let models = body["models"]
            .as_array()
            .map(|models| {
                models
                    .iter()
                    .filter_map(|model| model["name"].as_str())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(models)
    }

    /// Ask the server to download the configured model
    pub async fn pull_model(&self) -> Result<(), AssistantError> {
        info!("Pulling model '{}'", self.model);
        let response = self
            .client
            .post(format!("{}/api/pull", self.base_url))
            .json(&json!({ "name": self.model, "stream": false }))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(AssistantError::GenerationError(format!(
                "Failed to pull '{}': HTTP {}",
                self.model, status
            )))
        }
    }

    /// Check the server, the model, and a short generation
    pub async fn test_connection(&self) -> ConnectionReport {
        let mut report = ConnectionReport::default();

        let models = match self.list_models().await {
            Ok(models) => models,
            Err(e) => {
                report.error = Some(e.to_string());
                return report;
            }
        };
        report.server_available = true;
        report.model_available = self.has_model(&models);

        if report.model_available {
            match self
                .generate(CONNECTION_TEST_PROMPT, Some(CONNECTION_TEST_SYSTEM))
                .await
            {
                Ok(text) => report.test_response = Some(text),
                Err(e) => report.error = Some(e.to_string()),
            }
        }

        report
    }

    fn has_model(&self, models: &[String]) -> bool {
        models.iter().any(|name| name.contains(&self.model))
    }
}

#[async_trait]
impl TextGenerator for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn status(&self) -> ServiceStatus {
        match self.list_models().await {
            Ok(models) if self.has_model(&models) => ServiceStatus::Ready,
            Ok(_) => ServiceStatus::Unavailable(format!(
                "model '{}' is not installed (ollama pull {})",
                self.model, self.model
            )),
            Err(AssistantError::HttpError(e)) => {
                ServiceStatus::Unavailable(format!("cannot reach {}: {}", self.base_url, e))
            }
            Err(e) => ServiceStatus::Failed(e.to_string()),
        }
    }

    async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AssistantError> {
        let start = Instant::now();

        let mut payload = json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
            "options": {
                "temperature": self.temperature,
                "top_p": self.top_p,
                "num_predict": self.max_tokens,
                "repeat_penalty": self.repeat_penalty
            }
        });
        if let Some(system) = system {
            payload["system"] = json!(system);
        }

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let response_body = match parse_body(&body, "/api/generate") {
            Ok(value) => value,
            Err(_) if !status.is_success() => {
                return Err(AssistantError::GenerationError(format!(
                    "Ollama returned HTTP {}",
                    status
                )));
            }
            Err(e) => return Err(e),
        };
        debug!(
            "Ollama answered in {} ms: {:?}",
            start.elapsed().as_millis(),
            response_body
        );

        if let Some(error) = response_body.get("error") {
            let message = error.as_str().unwrap_or("Unknown error");
            warn!("Ollama reported an error: {}", message);
            return Err(AssistantError::GenerationError(message.to_string()));
        }
        if !status.is_success() {
            return Err(AssistantError::GenerationError(format!(
                "Ollama returned HTTP {}",
                status
            )));
        }

        response_body["response"]
            .as_str()
            .map(|text| text.trim().to_string())
            .ok_or_else(|| {
                AssistantError::GenerationError(format!(
                    "No 'response' field in Ollama answer: {}",
                    response_body
                ))
            })
    }
}

/// Decode a JSON answer, reporting non-JSON bodies (proxy pages) as generation failures
fn parse_body(body: &str, endpoint: &str) -> Result<Value, AssistantError> {
    serde_json::from_str(body).map_err(|e| {
        AssistantError::GenerationError(format!("Invalid JSON answer from {}: {}", endpoint, e))
    })
}
