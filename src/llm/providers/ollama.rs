//! Ollama provider implementation
//!
//! Talks to a local Ollama server; no API key needed

use crate::error::{DomainForgeError, Result};
use crate::llm::LlmProvider;
use crate::types::LlmConfig;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{build_suggestion_prompt, parse_name_list, status_error, transport_error, SYSTEM_PROMPT};

pub struct OllamaProvider {
    client: Client,
    model: String,
    base_url: String,
    temperature: f32,
}

impl OllamaProvider {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60)) // Longer timeout for local inference
            .build()
            .map_err(|e| DomainForgeError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            model: config.model.clone(),
            base_url: config
                .base_url
                .as_deref()
                .map(server_url)
                .unwrap_or_else(|| "http://localhost:11434".to_string()),
            temperature: config.temperature,
        })
    }
}

/// `OLLAMA_HOST` is often given as bare `host:port`
fn server_url(host: &str) -> String {
    let host = host.trim();
    if host.contains("://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn suggest_names(&self, description: &str, count: usize) -> Result<Vec<String>> {
        let request = OllamaRequest {
            model: self.model.clone(),
            system: SYSTEM_PROMPT.to_string(),
            prompt: build_suggestion_prompt(description, count),
            options: OllamaOptions {
                temperature: self.temperature,
            },
            stream: false,
        };

        let url = format!("{}/api/generate", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| transport_error(self.name(), e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(DomainForgeError::provider_unavailable(
                self.name(),
                format!("Model '{}' not found. Pull it first: ollama pull {}", self.model, self.model),
            ));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(self.name(), status, &body));
        }

        let parsed: OllamaResponse = response.json().await.map_err(|e| transport_error(self.name(), e))?;
        Ok(parse_name_list(&parsed.response))
    }

    fn name(&self) -> &'static str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_ready(&self) -> bool {
        true
    }
}

// Ollama API structures
#[derive(Serialize)]
struct OllamaRequest {
    model: String,
    system: String,
    prompt: String,
    options: OllamaOptions,
    stream: bool,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct OllamaResponse {
    response: String,
}
