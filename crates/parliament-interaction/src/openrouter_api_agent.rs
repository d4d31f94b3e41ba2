//! OpenRouterApiAgent - OpenAI-compatible chat completions via OpenRouter.

use async_trait::async_trait;
use parliament_core::agent::{AgentError, CouncilAgent, Prompt};
use parliament_core::config::OpenRouterConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::http;

pub const DEFAULT_OPENROUTER_MODEL: &str = "openai/gpt-4o";
const BASE_URL: &str = "https://openrouter.ai/api/v1";
const REFERER: &str = "https://parliamentarium.app";
const TITLE: &str = "Parliamentarium";

/// Agent implementation that talks to the OpenRouter HTTP API.
#[derive(Clone)]
pub struct OpenRouterApiAgent {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    system_prompt: Option<String>,
    max_tokens: Option<u32>,
}

impl OpenRouterApiAgent {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: http::client(),
            base_url: BASE_URL.to_string(),
            api_key: api_key.into(),
            model: model.into(),
            system_prompt: None,
            max_tokens: None,
        }
    }

    pub fn from_config(config: &OpenRouterConfig) -> Self {
        let model = config
            .model_name
            .clone()
            .unwrap_or_else(|| DEFAULT_OPENROUTER_MODEL.to_string());
        Self::new(config.api_key.clone(), model)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sent as the leading `system` message of every request.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_messages(&self, prompt: &Prompt) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &self.system_prompt {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: prompt.to_text(),
        });
        messages
    }

    async fn send_request(&self, body: &ChatCompletionRequest) -> Result<String, AgentError> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", REFERER)
            .header("X-Title", TITLE)
            .json(body)
            .send()
            .await
            .map_err(|err| http::map_send_error("OpenRouter", err))?;

        if !response.status().is_success() {
            return Err(http::error_from_response("OpenRouter", response).await);
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|err| {
            AgentError::Other(format!("Failed to parse OpenRouter response: {err}"))
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl CouncilAgent for OpenRouterApiAgent {
    fn expertise(&self) -> &str {
        "OpenRouter chat completions agent"
    }

    async fn execute(&self, prompt: Prompt) -> Result<String, AgentError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: self.build_messages(&prompt),
            max_tokens: self.max_tokens,
        };
        self.send_request(&request).await
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String, AgentError> {
    response
        .choices
        .into_iter()
        .find_map(|choice| choice.message.content)
        .ok_or_else(|| AgentError::ExecutionFailed("OpenRouter API returned no choices".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_lead_with_system_prompt() {
        let agent = OpenRouterApiAgent::new("key", "model").with_system_prompt("You are The ID");
        let messages = agent.build_messages(&Prompt::new("Speak").with_context("Topic: fire"));
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].content, "Context: Topic: fire\n\nSpeak");
    }

    #[test]
    fn test_from_config_defaults_model() {
        let agent = OpenRouterApiAgent::from_config(&OpenRouterConfig {
            api_key: "k".into(),
            model_name: None,
        });
        assert_eq!(agent.model(), DEFAULT_OPENROUTER_MODEL);
    }

    #[test]
    fn test_extract_text() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"Aye"}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text_response(response).unwrap(), "Aye");
        let empty: ChatCompletionResponse = serde_json::from_str("{}").unwrap();
        assert!(extract_text_response(empty).is_err());
    }
}
