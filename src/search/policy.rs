// file: src/search/policy.rs
// description: fixed and escalating freshness strategies over the search client
// reference: ordered buffered streams from futures

use crate::config::{FreshnessConfig, FreshnessModeKind};
use crate::models::{FreshnessWindow, SearchResult};
use crate::search::NewsSearch;
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreshnessMode {
    /// Search every query once at this window.
    Fixed(FreshnessWindow),
    /// Widen day -> all-time until something is found.
    Escalating,
}

impl FreshnessMode {
    pub fn from_config(config: &FreshnessConfig) -> Self {
        match config.mode {
            FreshnessModeKind::Fixed => FreshnessMode::Fixed(config.window),
            FreshnessModeKind::Escalating => FreshnessMode::Escalating,
        }
    }
}

pub struct FreshnessPolicy<S> {
    client: S,
    parallel_queries: usize,
}

impl<S: NewsSearch> FreshnessPolicy<S> {
    pub fn new(client: S, parallel_queries: usize) -> Self {
        Self {
            client,
            parallel_queries: parallel_queries.max(1),
        }
    }

    pub fn client(&self) -> &S {
        &self.client
    }

    /// Results keep query order, then endpoint order within each query.
    pub async fn resolve(&self, queries: &[String], mode: FreshnessMode) -> Vec<SearchResult> {
        if queries.is_empty() {
            return Vec::new();
        }

        match mode {
            FreshnessMode::Fixed(window) => self.search_window(queries, window).await,
            FreshnessMode::Escalating => {
                for window in FreshnessWindow::ESCALATION {
                    let results = self.search_window(queries, window).await;
                    if !results.is_empty() {
                        info!(%window, count = results.len(), "Found results");
                        return results;
                    }
                    info!(%window, "No results, widening freshness window");
                }
                Vec::new()
            }
        }
    }

    async fn search_window(&self, queries: &[String], window: FreshnessWindow) -> Vec<SearchResult> {
        let batches: Vec<Vec<SearchResult>> = stream::iter(queries)
            .map(|query| async move {
                match self.client.search(query, window).await {
                    Ok(results) => results,
                    Err(e) => {
                        warn!(query = %query, %window, error = %e, "Search failed; treating as no results");
                        Vec::new()
                    }
                }
            })
            .buffered(self.parallel_queries)
            .collect()
            .await;

        batches.into_iter().flatten().collect()
    }
}
