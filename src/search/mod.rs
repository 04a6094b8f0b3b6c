// file: src/search/mod.rs
// description: news search client, pacing, audit log and freshness policy
// reference: internal module structure

pub mod audit;
pub mod brave;
pub mod pacer;
pub mod policy;

pub use audit::AuditLog;
pub use brave::BraveNewsClient;
pub use pacer::Pacer;
pub use policy::{FreshnessMode, FreshnessPolicy};

use crate::error::Result;
use crate::models::{FreshnessWindow, SearchResult};

/// A news search backend queried once per query string and freshness window.
#[allow(async_fn_in_trait)]
pub trait NewsSearch {
    async fn search(&self, query: &str, freshness: FreshnessWindow) -> Result<Vec<SearchResult>>;
}
