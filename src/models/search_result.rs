// file: src/models/search_result.rs
// description: news search result record passed from search to summarizer
// reference: Brave news search result objects

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Query string that produced this result
    pub source_query: String,

    /// Headline
    pub title: String,

    /// Short description returned by the search endpoint
    pub description: String,

    /// Free-form age marker, e.g. "2 hours ago"
    pub published_age: String,

    /// Additional excerpts, possibly empty
    pub extra_snippets: Vec<String>,

    /// Article URL
    pub url: String,
}

impl SearchResult {
    pub fn new(
        source_query: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        published_age: impl Into<String>,
        extra_snippets: Vec<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            source_query: source_query.into(),
            title: title.into(),
            description: description.into(),
            published_age: published_age.into(),
            extra_snippets,
            url: url.into(),
        }
    }

    /// Plain text block used both in the LLM payload and the text audit log.
    pub fn format_block(&self) -> String {
        let mut block = format!(
            "{} - {} - {} - {}\n",
            self.published_age, self.source_query, self.title, self.description
        );
        for snippet in &self.extra_snippets {
            block.push_str(snippet);
            block.push('\n');
        }
        block.push_str(&format!("URL: {}\n", self.url));
        block
    }
}
