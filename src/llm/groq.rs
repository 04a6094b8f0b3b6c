// file: src/llm/groq.rs
// description: Groq chat completions client (OpenAI-compatible)
// reference: https://console.groq.com/docs/api-reference#chat-create

use crate::config::LlmConfig;
use crate::error::{PipelineError, Result};
use crate::llm::TextGenerator;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct GroqChatClient {
    client: Client,
    api_key: String,
    config: LlmConfig,
}

impl GroqChatClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| PipelineError::Config("llm.api_key is required".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| PipelineError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            config: config.clone(),
        })
    }

    pub fn parse_completion(body: &str) -> Result<String> {
        let completion: ChatCompletionResponse = serde_json::from_str(body)
            .map_err(|e| PipelineError::Parse(format!("Failed to parse Groq API response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| {
                PipelineError::UpstreamEmpty("No completion content returned from Groq API".to_string())
            })
    }
}

impl TextGenerator for GroqChatClient {
    async fn generate(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!(
            model = %self.config.model,
            payload_chars = user.len(),
            "Requesting completion from Groq API"
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| PipelineError::Network(format!("Failed to send Groq API request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PipelineError::Network(format!(
                "Groq API request failed with status {}: {}",
                status, error_text
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| PipelineError::Network(format!("Failed to read Groq API response: {}", e)))?;

        Self::parse_completion(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_parse_completion() {
        let body = r#"{
            "id": "chatcmpl-1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "Topic: Jordan"}, "finish_reason": "stop"}]
        }"#;
        assert_eq!(GroqChatClient::parse_completion(body).unwrap(), "Topic: Jordan");
    }

    #[test]
    fn test_parse_completion_without_choices() {
        let err = GroqChatClient::parse_completion(r#"{"choices": []}"#).unwrap_err();
        assert!(matches!(err, PipelineError::UpstreamEmpty(_)));

        let err = GroqChatClient::parse_completion(
            r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::UpstreamEmpty(_)));
    }

    #[test]
    fn test_parse_completion_malformed() {
        let err = GroqChatClient::parse_completion("upstream timeout").unwrap_err();
        assert!(matches!(err, PipelineError::Parse(_)));
    }

    #[test]
    fn test_request_serialization() {
        let request = ChatCompletionRequest {
            model: "llama-3.1-70b-versatile",
            messages: vec![ChatMessage {
                role: "system",
                content: "be brief",
            }],
            max_tokens: 512,
            temperature: 0.0,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["max_tokens"], 512);
        assert_eq!(json["messages"][0]["role"], "system");
    }

    #[test]
    fn test_new_requires_api_key() {
        let config = Config::default_config().llm;
        assert!(GroqChatClient::new(&config).is_err());
    }
}
