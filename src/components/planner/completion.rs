use crate::config::Config;
use crate::error::{planner_error, SyncResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";

/// One chat message in a completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Chat-style completion request
///
/// A system instruction, an optional assistant-context message carrying the
/// existing-events constraints, and the per-task user prompt.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: String,
    pub context: Option<String>,
    pub user: String,
}

/// Seam for the text-completion service so tests can substitute a mock
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send one request and return the reply's text body
    async fn complete(&self, request: &CompletionRequest) -> SyncResult<String>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// OpenAI chat completions backend
pub struct OpenAiBackend {
    config: Arc<RwLock<Config>>,
    client: reqwest::Client,
}

impl OpenAiBackend {
    pub fn new(config: Arc<RwLock<Config>>) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(&self, request: &CompletionRequest) -> SyncResult<String> {
        let (api_key, model) = {
            let config_read = self.config.read().await;
            (
                config_read.openai_api_key.clone(),
                config_read.openai_model.clone(),
            )
        };

        let mut messages = vec![ChatMessage {
            role: "system".to_string(),
            content: request.system.clone(),
        }];
        if let Some(context) = &request.context {
            messages.push(ChatMessage {
                role: "assistant".to_string(),
                content: context.clone(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: request.user.clone(),
        });

        let body = ChatCompletionRequest {
            model,
            messages,
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
        };

        let response = self
            .client
            .post(OPENAI_URL)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| planner_error(&format!("Completion request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(planner_error(&format!(
                "Completion request failed: HTTP {} - {}",
                status, error_body
            )));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| planner_error(&format!("Failed to parse completion response: {}", e)))?;

        parsed
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .ok_or_else(|| planner_error("No choices in completion response"))
    }
}
