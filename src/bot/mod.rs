// file: src/bot/mod.rs
// description: message pipeline, update polling and runtime statistics
// reference: internal module structure

pub mod pipeline;
pub mod poller;
pub mod stats;

pub use pipeline::{Outcome, TopicPipeline};
pub use poller::{UpdatePoller, UpdateSource};
pub use stats::{BotStats, StatsTracker};
