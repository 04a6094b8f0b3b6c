// file: src/gateway/telegram.rs
// description: Telegram Bot API client for long-polling updates and sending replies
// reference: https://core.telegram.org/bots/api#getupdates

use crate::config::TelegramConfig;
use crate::error::{PipelineError, Result};
use crate::gateway::{MessageGateway, split_message};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Telegram rejects messages longer than this.
pub const TELEGRAM_MAX_MESSAGE_CHARS: usize = 4096;

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<IncomingMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

impl Update {
    /// Chat id and text, when this update is a text message.
    pub fn text_message(&self) -> Option<(String, &str)> {
        let message = self.message.as_ref()?;
        let text = message.text.as_deref()?;
        Some((message.chat.id.to_string(), text))
    }
}

#[derive(Debug, Deserialize)]
struct TelegramResponse<T> {
    ok: bool,
    #[serde(default)]
    result: Option<T>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    /// Carries the bot token; reqwest errors must drop their URL before being formatted.
    base_url: String,
    poll_timeout_secs: u64,
}

impl TelegramClient {
    pub fn new(config: &TelegramConfig) -> Result<Self> {
        let token = config
            .bot_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| PipelineError::Config("telegram.bot_token is required".to_string()))?;

        // The long-poll holds the request open for poll_timeout_secs.
        let client = Client::builder()
            .timeout(Duration::from_secs(config.poll_timeout_secs + 10))
            .build()
            .map_err(|e| PipelineError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: format!("{}/bot{}", config.api_base.trim_end_matches('/'), token),
            poll_timeout_secs: config.poll_timeout_secs,
        })
    }

    pub async fn get_updates(&self, offset: Option<i64>) -> Result<Vec<Update>> {
        let mut params = vec![("timeout", self.poll_timeout_secs.to_string())];
        if let Some(offset) = offset {
            params.push(("offset", offset.to_string()));
        }

        let response = self
            .client
            .get(format!("{}/getUpdates", self.base_url))
            .query(&params)
            .send()
            .await
            .map_err(|e| PipelineError::Network(format!("getUpdates request failed: {}", e.without_url())))?;

        let body = response
            .text()
            .await
            .map_err(|e| PipelineError::Network(format!("Failed to read getUpdates response: {}", e.without_url())))?;

        let updates = Self::parse_updates(&body)?;
        debug!(count = updates.len(), ?offset, "Polled Telegram updates");
        Ok(updates)
    }

    pub fn parse_updates(body: &str) -> Result<Vec<Update>> {
        let response: TelegramResponse<Vec<Update>> = serde_json::from_str(body)
            .map_err(|e| PipelineError::Parse(format!("Failed to parse getUpdates response: {}", e)))?;

        if !response.ok {
            return Err(PipelineError::Network(format!(
                "getUpdates rejected: {}",
                response.description.unwrap_or_else(|| "no description".to_string())
            )));
        }

        Ok(response.result.unwrap_or_default())
    }

    async fn send_chunk(&self, chat_id: &str, text: &str) -> Result<()> {
        let response = self
            .client
            .post(format!("{}/sendMessage", self.base_url))
            .json(&SendMessageRequest { chat_id, text })
            .send()
            .await
            .map_err(|e| PipelineError::Network(format!("sendMessage request failed: {}", e.without_url())))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PipelineError::Network(format!(
                "sendMessage failed with status {}: {}",
                status, error_text
            )));
        }

        Ok(())
    }
}

impl MessageGateway for TelegramClient {
    async fn send(&self, chat_id: &str, text: &str) -> Result<()> {
        let chunks = split_message(text, TELEGRAM_MAX_MESSAGE_CHARS);
        info!(chat_id, chunks = chunks.len(), chars = text.chars().count(), "Sending Telegram message");

        for chunk in chunks {
            self.send_chunk(chat_id, &chunk).await?;
        }
        Ok(())
    }
}
