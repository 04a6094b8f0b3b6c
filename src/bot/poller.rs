// file: src/bot/poller.rs
// description: Telegram long-poll loop with offset tracking and chat filtering
// reference: https://core.telegram.org/bots/api#getupdates

use crate::bot::pipeline::TopicPipeline;
use crate::config::TelegramConfig;
use crate::error::Result;
use crate::gateway::{MessageGateway, TelegramClient, Update};
use crate::llm::TextGenerator;
use crate::search::NewsSearch;
use crate::utils::Validator;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Where inbound updates come from.
#[allow(async_fn_in_trait)]
pub trait UpdateSource {
    async fn poll(&self, offset: Option<i64>) -> Result<Vec<Update>>;
}

impl UpdateSource for TelegramClient {
    async fn poll(&self, offset: Option<i64>) -> Result<Vec<Update>> {
        self.get_updates(offset).await
    }
}

pub struct UpdatePoller<U> {
    source: U,
    offset: Option<i64>,
    allowed_chats: Vec<String>,
    retry_delay: Duration,
}

impl<U: UpdateSource> UpdatePoller<U> {
    pub fn new(source: U, config: &TelegramConfig) -> Self {
        let allowed_chats = if !config.allowed_chat_ids.is_empty() {
            config.allowed_chat_ids.clone()
        } else {
            config.default_chat_id.iter().cloned().collect()
        };

        Self {
            source,
            offset: None,
            allowed_chats,
            retry_delay: Duration::from_secs(config.retry_delay_secs),
        }
    }

    pub fn offset(&self) -> Option<i64> {
        self.offset
    }

    /// An empty list serves every chat.
    pub fn is_allowed(&self, chat_id: &str) -> bool {
        self.allowed_chats.is_empty() || self.allowed_chats.iter().any(|id| id == chat_id)
    }

    /// One `getUpdates` round. Returns the number of messages handed to the pipeline.
    pub async fn poll_once<S, G, M>(&mut self, pipeline: &TopicPipeline<S, G, M>) -> Result<usize>
    where
        S: NewsSearch,
        G: TextGenerator,
        M: MessageGateway,
    {
        let updates = self.source.poll(self.offset).await?;
        Ok(self.dispatch(updates, pipeline).await)
    }

    /// Polls until Ctrl-C. A message being handled when the signal arrives is finished first.
    pub async fn run<S, G, M>(&mut self, pipeline: &TopicPipeline<S, G, M>)
    where
        S: NewsSearch,
        G: TextGenerator,
        M: MessageGateway,
    {
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        info!(allowed_chats = self.allowed_chats.len(), "Listening for Telegram updates");

        loop {
            let polled = tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown signal received");
                    break;
                }
                polled = self.source.poll(self.offset) => polled,
            };

            match polled {
                Ok(updates) => {
                    self.dispatch(updates, pipeline).await;
                }
                Err(e) => {
                    if e.is_transient() {
                        warn!(error = %e, retry_in = ?self.retry_delay, "Polling failed, retrying");
                    } else {
                        error!(error = %e, retry_in = ?self.retry_delay, "Polling failed");
                    }
                    tokio::select! {
                        _ = &mut shutdown => {
                            info!("Shutdown signal received");
                            break;
                        }
                        _ = tokio::time::sleep(self.retry_delay) => {}
                    }
                }
            }
        }
    }

    async fn dispatch<S, G, M>(&mut self, updates: Vec<Update>, pipeline: &TopicPipeline<S, G, M>) -> usize
    where
        S: NewsSearch,
        G: TextGenerator,
        M: MessageGateway,
    {
        let mut handled = 0;

        for update in updates {
            self.offset = Some(update.update_id + 1);

            let Some((chat_id, text)) = update.text_message() else {
                debug!(update_id = update.update_id, "Skipping non-text update");
                continue;
            };

            if !self.is_allowed(&chat_id) {
                warn!(update_id = update.update_id, chat_id = %chat_id, "Ignoring message from unlisted chat");
                continue;
            }

            info!(
                update_id = update.update_id,
                chat_id = %chat_id,
                text = %Validator::truncate_text(text, 80),
                "Received message"
            );
            let outcome = pipeline.handle(&chat_id, text).await;
            debug!(update_id = update.update_id, ?outcome, "Update handled");
            handled += 1;
        }

        handled
    }
}
