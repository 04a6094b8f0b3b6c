// file: src/llm/mod.rs
// description: text generation client, prompts and summarizer
// reference: internal module structure

pub mod groq;
pub mod prompts;
pub mod summarizer;

pub use groq::GroqChatClient;
pub use summarizer::{NO_RESULTS_SENTINEL, SUMMARY_FAILED_NOTICE, Summarizer};

use crate::error::Result;

/// Generates text from a system instruction and a user payload.
#[allow(async_fn_in_trait)]
pub trait TextGenerator {
    async fn generate(&self, system: &str, user: &str) -> Result<String>;
}
