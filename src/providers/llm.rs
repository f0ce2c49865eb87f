//! LLM client for OpenAI-compatible chat completion APIs
//!
//! The hotel and activity agents use this to turn a structured prompt
//! into JSON payloads. Defaults to the Groq API but any compatible
//! provider works via a custom base URL.

use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Configuration for a chat-completions provider
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl ProviderConfig {
    /// Groq provider configuration
    pub fn groq(api_key: String, model: String) -> Self {
        Self {
            base_url: GROQ_BASE_URL.to_string(),
            api_key,
            model,
        }
    }
}

/// A single chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Chat-completions client (Groq and other OpenAI-compatible providers)
#[derive(Clone)]
pub struct LlmClient {
    client: Arc<Client>,
    config: ProviderConfig,
}

impl LlmClient {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            client: Arc::new(Client::new()),
            config,
        }
    }

    /// Run a single-turn completion and return the assistant text
    pub async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        self.chat(vec![ChatMessage::user(prompt)], max_tokens).await
    }

    /// Run a chat completion with explicit messages
    pub async fn chat(&self, messages: Vec<ChatMessage>, max_tokens: u32) -> Result<String> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: Some(max_tokens),
            temperature: 0.7,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .context("chat completion request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("chat completion returned {}: {}", status, body);
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .context("failed to parse chat completion response")?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .context("chat completion response had no choices")
    }
}

/// Pull the first JSON array out of an LLM reply, tolerating markdown
/// code fences and surrounding prose
pub fn extract_json_array(text: &str) -> Result<serde_json::Value> {
    let trimmed = text
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    let start = trimmed.find('[').context("no JSON array in response")?;
    let end = trimmed.rfind(']').context("unterminated JSON array")?;
    if end < start {
        bail!("malformed JSON array in response");
    }
    serde_json::from_str(&trimmed[start..=end]).context("invalid JSON array in response")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_fenced_array() {
        let text = "Here you go:\n```json\n[{\"name\": \"Taj\"}]\n```";
        let value = extract_json_array(text).unwrap();
        assert_eq!(value[0]["name"], "Taj");
    }

    #[test]
    fn extracts_bare_array_with_prose() {
        let text = "Sure! [1, 2, 3] hope that helps";
        let value = extract_json_array(text).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 3);
    }

    #[test]
    fn rejects_no_array() {
        assert!(extract_json_array("no structured data here").is_err());
    }
}
