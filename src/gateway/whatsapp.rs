// file: src/gateway/whatsapp.rs
// description: Twilio WhatsApp delivery as the alternate reply channel
// reference: https://www.twilio.com/docs/whatsapp/api

use crate::config::WhatsAppConfig;
use crate::error::{PipelineError, Result};
use crate::gateway::{MessageGateway, split_message};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

/// Twilio truncates WhatsApp bodies beyond this length.
pub const WHATSAPP_MAX_MESSAGE_CHARS: usize = 1600;

pub struct WhatsAppClient {
    client: Client,
    messages_url: String,
    account_sid: String,
    auth_token: String,
    from: String,
    to: String,
}

impl WhatsAppClient {
    pub fn new(config: &WhatsAppConfig) -> Result<Self> {
        let account_sid = config
            .account_sid
            .clone()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| PipelineError::Config("whatsapp.account_sid is required".to_string()))?;
        let auth_token = config
            .auth_token
            .clone()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| PipelineError::Config("whatsapp.auth_token is required".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| PipelineError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let messages_url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            config.api_base.trim_end_matches('/'),
            account_sid
        );

        Ok(Self {
            client,
            messages_url,
            account_sid,
            auth_token,
            from: config.from.clone(),
            to: config.to.clone(),
        })
    }
}

impl MessageGateway for WhatsAppClient {
    /// The recipient is fixed by configuration; `chat_id` only identifies the requester in logs.
    async fn send(&self, chat_id: &str, text: &str) -> Result<()> {
        let chunks = split_message(text, WHATSAPP_MAX_MESSAGE_CHARS);
        info!(requested_by = chat_id, to = %self.to, chunks = chunks.len(), "Sending WhatsApp message");

        for chunk in chunks {
            let form = [("From", self.from.as_str()), ("To", self.to.as_str()), ("Body", chunk.as_str())];

            let response = self
                .client
                .post(&self.messages_url)
                .basic_auth(&self.account_sid, Some(&self.auth_token))
                .form(&form)
                .send()
                .await
                .map_err(|e| PipelineError::Network(format!("Twilio request failed: {}", e)))?;

            if !response.status().is_success() {
                let status = response.status();
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                return Err(PipelineError::Network(format!(
                    "Twilio request failed with status {}: {}",
                    status, error_text
                )));
            }

            debug!(chars = chunk.chars().count(), "WhatsApp chunk accepted");
        }

        Ok(())
    }
}
