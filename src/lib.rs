// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod bot;
pub mod config;
pub mod error;
pub mod gateway;
pub mod llm;
pub mod models;
pub mod resolver;
pub mod search;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

pub use bot::{BotStats, Outcome, TopicPipeline, UpdatePoller, UpdateSource};
pub use config::{Config, LlmConfig, SearchConfig, TelegramConfig};
pub use error::{PipelineError, Result};
pub use gateway::{ConsoleGateway, Delivery, MessageGateway, TelegramClient, Update, WhatsAppClient};
pub use llm::{GroqChatClient, NO_RESULTS_SENTINEL, Summarizer, TextGenerator};
pub use models::{FreshnessWindow, SearchResult};
pub use resolver::{Command, TopicResolver, parse_command};
pub use search::{AuditLog, BraveNewsClient, FreshnessMode, FreshnessPolicy, NewsSearch, Pacer};
pub use utils::{OperationTimer, Validator};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let config = Config::default_config();
        let resolver = TopicResolver::new(config.regions);
        assert_eq!(resolver.resolve("europe").len(), 15);
        assert!(matches!(parse_command("/help"), Command::Help));
    }
}
