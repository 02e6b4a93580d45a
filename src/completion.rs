use reqwest::Client;
use tracing::debug;

use crate::{
    error::AppError,
    models::groq::{ChatMessage, CompletionRequest, CompletionResponse},
};

const SYSTEM_PROMPT: &str = "You are a helpful, professional, and friendly AI assistant.";
const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 1024;

/// Client for an OpenAI-compatible chat completion endpoint. One instance is
/// built at startup and shared by all request handlers.
#[derive(Clone)]
pub struct CompletionClient {
    http_client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl CompletionClient {
    #[must_use]
    pub fn new(http_client: Client, base_url: String, api_key: String, model: String) -> Self {
        Self {
            http_client,
            base_url,
            api_key,
            model,
        }
    }

    /// Sends one two-turn completion request (fixed system instruction plus
    /// the user's message) and returns the completion text.
    pub async fn complete(&self, user_message: &str) -> Result<String, AppError> {
        let request = CompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(user_message),
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.map_err(|e| {
                AppError::Internal(format!("Failed to read upstream error body: {e}"))
            })?;
            return Err(AppError::Upstream(status, error_text));
        }

        let completion: CompletionResponse = response.json().await?;
        debug!("Completion response: {completion:?}");

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AppError::Internal("Completion response had no choices".to_string()))
    }
}
