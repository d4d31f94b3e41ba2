//! GeminiApiAgent - Direct REST API implementation for Gemini.
//!
//! Calls `models/{model}:generateContent` with the API key as a query
//! parameter. A persona's charge travels as the system instruction.

use async_trait::async_trait;
use parliament_core::agent::{AgentError, CouncilAgent, Prompt};
use parliament_core::config::GeminiConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::http;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash-latest";
const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Agent implementation that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiAgent {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    system_instruction: Option<String>,
}

impl GeminiApiAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: http::client(),
            base_url: BASE_URL.to_string(),
            api_key: api_key.into(),
            model: model.into(),
            system_instruction: None,
        }
    }

    /// Builds the agent for the `seat`-th Gemini seat, spreading the
    /// configured keys round-robin. `None` when no key is configured.
    pub fn for_seat(config: &GeminiConfig, seat: usize) -> Option<Self> {
        if config.api_keys.is_empty() {
            return None;
        }
        let key = &config.api_keys[seat % config.api_keys.len()];
        let model = config
            .model_name
            .clone()
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());
        Some(Self::new(key.clone(), model))
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Points the agent at another endpoint (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Adds a system instruction that will be sent alongside every request.
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String, AgentError> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            self.base_url,
            model = self.model,
            api_key = self.api_key
        );

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| http::map_send_error("Gemini", err))?;

        if !response.status().is_success() {
            return Err(http::error_from_response("Gemini", response).await);
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| AgentError::Other(format!("Failed to parse Gemini response: {err}")))?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl CouncilAgent for GeminiApiAgent {
    fn expertise(&self) -> &str {
        "Gemini API agent"
    }

    async fn execute(&self, prompt: Prompt) -> Result<String, AgentError> {
        let text = prompt.to_text();
        if text.trim().is_empty() {
            return Err(AgentError::ExecutionFailed(
                "Gemini prompt must not be empty".into(),
            ));
        }

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text }],
            }],
            system_instruction: self.system_instruction.as_ref().map(|text| Content {
                role: None,
                parts: vec![Part {
                    text: text.to_string(),
                }],
            }),
        };
        self.send_request(&request).await
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
}

#[derive(Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String, AgentError> {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or_else(|| {
            AgentError::ExecutionFailed(
                "Gemini API returned no text in the response candidates".into(),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_spread_round_robin() {
        let config = GeminiConfig {
            api_keys: vec!["k0".into(), "k1".into(), "k2".into()],
            model_name: None,
        };
        let keys: Vec<String> = (0..7)
            .map(|seat| GeminiApiAgent::for_seat(&config, seat).unwrap().api_key)
            .collect();
        assert_eq!(keys, ["k0", "k1", "k2", "k0", "k1", "k2", "k0"]);
        assert_eq!(
            GeminiApiAgent::for_seat(&config, 0).unwrap().model(),
            DEFAULT_GEMINI_MODEL
        );
    }

    #[test]
    fn test_no_keys_no_agent() {
        let config = GeminiConfig {
            api_keys: vec![],
            model_name: Some("gemini-2.0-flash-exp".into()),
        };
        assert!(GeminiApiAgent::for_seat(&config, 0).is_none());
    }

    #[test]
    fn test_request_serializes_system_instruction_camel_case() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![Part { text: "hi".into() }],
            }],
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part {
                    text: "You are The Mouse".into(),
                }],
            }),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "You are The Mouse");
        assert_eq!(json["contents"][0]["role"], "user");
    }

    #[test]
    fn test_extract_text_takes_first_text_part() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"inlineData":{}},{"text":"An idea"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text_response(response).unwrap(), "An idea");

        let empty: GenerateContentResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(extract_text_response(empty).is_err());
    }
}
