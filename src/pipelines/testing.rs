use crate::error::AssistantError;
use crate::providers::{ServiceStatus, TextGenerator};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Scripted generator: each call pops the next answer, `None` is a failure
pub struct StubGenerator {
    status: ServiceStatus,
    answers: Mutex<VecDeque<Option<String>>>,
    prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    pub fn new(status: ServiceStatus, answers: Vec<Option<String>>) -> Self {
        Self {
            status,
            answers: Mutex::new(answers.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn ready(answers: Vec<Option<String>>) -> Self {
        Self::new(ServiceStatus::Ready, answers)
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    fn name(&self) -> &str {
        "stub"
    }

    async fn status(&self) -> ServiceStatus {
        self.status.clone()
    }

    async fn generate(
        &self,
        prompt: &str,
        _system: Option<&str>,
    ) -> Result<String, AssistantError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .flatten()
            .ok_or_else(|| AssistantError::GenerationError("scripted failure".to_string()))
    }
}
