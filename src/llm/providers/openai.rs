//! OpenAI provider implementation
//!
//! Supports OpenAI API and OpenAI-compatible APIs (OpenRouter, OneAPI, etc.)

use crate::error::{DomainForgeError, Result};
use crate::llm::LlmProvider;
use crate::types::LlmConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{build_suggestion_prompt, parse_name_list, status_error, transport_error, SYSTEM_PROMPT};

pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
}

impl OpenAiProvider {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(DomainForgeError::config("OpenAI API key is required (OPENAI_API_KEY)"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| DomainForgeError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.clone().unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            temperature: config.temperature,
        })
    }

    /// Full API URL, adding `/v1` when the base URL lacks it
    fn build_url(&self, endpoint: &str) -> String {
        let base_url = self.base_url.trim_end_matches('/');
        if base_url.ends_with("/v1") {
            format!("{}{}", base_url, endpoint)
        } else {
            format!("{}/v1{}", base_url, endpoint)
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn suggest_names(&self, description: &str, count: usize) -> Result<Vec<String>> {
        let request = OpenAiRequest {
            model: self.model.clone(),
            messages: vec![
                OpenAiMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                OpenAiMessage {
                    role: "user".to_string(),
                    content: build_suggestion_prompt(description, count),
                },
            ],
            temperature: self.temperature,
            max_tokens: 1000,
        };

        let url = self.build_url("/chat/completions");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| transport_error(self.name(), e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(self.name(), status, &body));
        }

        let parsed: OpenAiResponse = response.json().await.map_err(|e| transport_error(self.name(), e))?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();

        Ok(parse_name_list(&content))
    }

    fn name(&self) -> &'static str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_ready(&self) -> bool {
        !self.api_key.is_empty()
    }
}

// OpenAI API structures
#[derive(Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(base_url: Option<&str>) -> OpenAiProvider {
        OpenAiProvider::new(&LlmConfig {
            api_key: "sk-test".to_string(),
            base_url: base_url.map(str::to_string),
            ..LlmConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_requires_api_key() {
        assert!(OpenAiProvider::new(&LlmConfig::default()).is_err());
    }

    #[test]
    fn test_build_url() {
        assert_eq!(
            provider(None).build_url("/chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            provider(Some("https://openrouter.ai/api/")).build_url("/chat/completions"),
            "https://openrouter.ai/api/v1/chat/completions"
        );
    }

    #[test]
    fn test_response_shape() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"[\"zenly\"]"}}]}"#;
        let parsed: OpenAiResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parse_name_list(&parsed.choices[0].message.content), vec!["zenly"]);
    }
}
