// file: src/resolver/mod.rs
// description: inbound text parsing and topic expansion
// reference: internal module structure

pub mod command;
pub mod topic;

pub use command::{Command, HELP_TEXT, parse_command};
pub use topic::TopicResolver;
