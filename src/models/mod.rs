// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod freshness;
pub mod search_result;

pub use freshness::FreshnessWindow;
pub use search_result::SearchResult;
