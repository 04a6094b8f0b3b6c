// file: src/search/brave.rs
// description: Brave news search client with pacing and audit logging
// reference: https://api-dashboard.search.brave.com/app/documentation/news-search/get-started

use crate::config::SearchConfig;
use crate::error::{PipelineError, Result};
use crate::models::{FreshnessWindow, SearchResult};
use crate::search::NewsSearch;
use crate::search::audit::AuditLog;
use crate::search::pacer::Pacer;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

lazy_static! {
    static ref MARKUP_TAG: Regex = Regex::new(r"</?[A-Za-z][^>]*>").expect("MARKUP_TAG regex is valid");
}

#[derive(Debug, Deserialize)]
struct BraveNewsResponse {
    #[serde(default)]
    results: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct BraveNewsItem {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    age: Option<String>,
    page_age: Option<String>,
    #[serde(default)]
    extra_snippets: Option<Vec<String>>,
}

pub struct BraveNewsClient {
    client: Client,
    api_key: String,
    config: SearchConfig,
    pacer: Pacer,
    audit: Arc<AuditLog>,
}

impl BraveNewsClient {
    pub fn new(config: &SearchConfig, audit: Arc<AuditLog>) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| PipelineError::Config("search.api_key is required".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .gzip(true)
            .build()
            .map_err(|e| PipelineError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let pacer = Pacer::new(Duration::from_millis(config.min_interval_ms));
        debug!(
            endpoint = %config.endpoint,
            min_interval = ?pacer.min_interval(),
            "Brave news client ready"
        );

        Ok(Self {
            client,
            api_key,
            config: config.clone(),
            pacer,
            audit,
        })
    }

    fn query_params(&self, query: &str, freshness: FreshnessWindow) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", query.to_string()),
            ("count", self.config.result_count.to_string()),
            ("country", self.config.country.clone()),
            ("search_lang", self.config.search_lang.clone()),
            ("spellcheck", if self.config.spellcheck { "1" } else { "0" }.to_string()),
            ("extra_snippets", self.config.extra_snippets.to_string()),
        ];

        if let Some(code) = freshness.as_query_param() {
            params.push(("freshness", code.to_string()));
        }

        params
    }

    /// Records missing a title, description or URL are skipped, not fatal.
    pub fn parse_results(query: &str, body: &str) -> Result<Vec<SearchResult>> {
        let response: BraveNewsResponse = serde_json::from_str(body)
            .map_err(|e| PipelineError::Parse(format!("Failed to parse Brave response: {}", e)))?;

        let Some(items) = response.results else {
            debug!(query, "Brave response has no results field");
            return Ok(Vec::new());
        };

        let mut results = Vec::with_capacity(items.len());
        for (index, value) in items.into_iter().enumerate() {
            let item: BraveNewsItem = match serde_json::from_value(value) {
                Ok(item) => item,
                Err(e) => {
                    debug!(query, index, error = %e, "Skipping malformed result");
                    continue;
                }
            };

            let (Some(title), Some(description), Some(url)) = (item.title, item.description, item.url)
            else {
                debug!(query, index, "Skipping result missing title, description or url");
                continue;
            };

            let published_age = item
                .age
                .or(item.page_age)
                .filter(|age| !age.trim().is_empty())
                .unwrap_or_else(|| "unknown".to_string());

            let extra_snippets = item
                .extra_snippets
                .unwrap_or_default()
                .iter()
                .map(|s| strip_markup(s))
                .collect();

            results.push(SearchResult::new(
                query,
                strip_markup(&title),
                strip_markup(&description),
                published_age,
                extra_snippets,
                url,
            ));
        }

        Ok(results)
    }
}

impl NewsSearch for BraveNewsClient {
    async fn search(&self, query: &str, freshness: FreshnessWindow) -> Result<Vec<SearchResult>> {
        self.pacer.wait().await;

        debug!(query, %freshness, "Requesting Brave news search");

        let response = self
            .client
            .get(&self.config.endpoint)
            .header("Accept", "application/json")
            .header("X-Subscription-Token", &self.api_key)
            .query(&self.query_params(query, freshness))
            .send()
            .await
            .map_err(|e| PipelineError::Network(format!("Failed to send Brave request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PipelineError::Network(format!(
                "Brave request failed with status {}: {}",
                status, error_text
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| PipelineError::Network(format!("Failed to read Brave response: {}", e)))?;

        let results = Self::parse_results(query, &body)?;

        for result in &results {
            if let Err(e) = self.audit.record(result).await {
                warn!(error = %e, url = %result.url, "Failed to write audit log entry");
            }
        }

        info!(query, %freshness, count = results.len(), "Brave news search complete");
        Ok(results)
    }
}

fn strip_markup(text: &str) -> String {
    MARKUP_TAG
        .replace_all(text, "")
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .trim()
        .to_string()
}
