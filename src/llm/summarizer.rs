// file: src/llm/summarizer.rs
// description: turns aggregated search results into a plain-text summary
// reference: chat completions with a fixed system instruction

use crate::config::SummaryStyle;
use crate::error::PipelineError;
use crate::gateway::MessageGateway;
use crate::llm::TextGenerator;
use crate::llm::prompts::{build_payload, system_prompt};
use crate::models::SearchResult;
use crate::utils::OperationTimer;
use std::time::Duration;
use tracing::{error, info, warn};

/// Returned for an empty result set; the generator is never called for it.
pub const NO_RESULTS_SENTINEL: &str = "No news results to summarize.";

/// Sent to the chat when generation fails. Upstream detail stays in the logs.
pub const SUMMARY_FAILED_NOTICE: &str =
    "Sorry, I could not summarize the news right now. Please try again later.";

pub struct Summarizer<G> {
    generator: G,
    style: SummaryStyle,
}

impl<G: TextGenerator> Summarizer<G> {
    pub fn new(generator: G, style: SummaryStyle) -> Self {
        Self { generator, style }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// On generation failure the error notice goes to `chat_id` and `""` is returned.
    pub async fn summarize<M: MessageGateway>(
        &self,
        results: &[SearchResult],
        gateway: &M,
        chat_id: &str,
    ) -> String {
        if results.is_empty() {
            return NO_RESULTS_SENTINEL.to_string();
        }

        let timer = OperationTimer::new("summarize");
        let system = system_prompt(self.style);
        let payload = build_payload(results);

        let outcome = self
            .generator
            .generate(&system, &payload)
            .await
            .map(|text| strip_emphasis(&text))
            .and_then(|text| {
                if text.is_empty() {
                    Err(PipelineError::UpstreamEmpty(
                        "Summary was empty after cleanup".to_string(),
                    ))
                } else {
                    Ok(text)
                }
            });

        timer.warn_if_slow(Duration::from_secs(60), "summary generation");

        match outcome {
            Ok(summary) => {
                timer.finish_with_count(results.len());
                info!(chars = summary.chars().count(), "Summary generated");
                summary
            }
            Err(e) => {
                error!(error = %e, results = results.len(), "Summary generation failed");
                if let Err(send_err) = gateway.send(chat_id, SUMMARY_FAILED_NOTICE).await {
                    warn!(error = %send_err, "Failed to deliver error notice");
                }
                String::new()
            }
        }
    }
}

/// Models occasionally ignore the no-markdown instruction.
fn strip_emphasis(text: &str) -> String {
    text.replace('*', "").trim().to_string()
}
