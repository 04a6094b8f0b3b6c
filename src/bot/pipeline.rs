// file: src/bot/pipeline.rs
// description: handles one inbound chat message end to end
// reference: parse -> resolve -> search -> summarize -> reply

use crate::bot::stats::{BotStats, StatsTracker};
use crate::gateway::MessageGateway;
use crate::llm::{Summarizer, TextGenerator};
use crate::resolver::{Command, HELP_TEXT, TopicResolver, parse_command};
use crate::search::{FreshnessMode, FreshnessPolicy, NewsSearch};
use crate::utils::OperationTimer;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

/// How a message was dealt with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Help,
    NoResults,
    Summarized,
    Failed,
}

pub struct TopicPipeline<S, G, M> {
    resolver: TopicResolver,
    policy: FreshnessPolicy<S>,
    summarizer: Summarizer<G>,
    gateway: M,
    default_mode: FreshnessMode,
    stats: StatsTracker,
}

impl<S, G, M> TopicPipeline<S, G, M>
where
    S: NewsSearch,
    G: TextGenerator,
    M: MessageGateway,
{
    pub fn new(
        resolver: TopicResolver,
        policy: FreshnessPolicy<S>,
        summarizer: Summarizer<G>,
        gateway: M,
        default_mode: FreshnessMode,
    ) -> Self {
        Self {
            resolver,
            policy,
            summarizer,
            gateway,
            default_mode,
            stats: StatsTracker::new(),
        }
    }

    pub fn policy(&self) -> &FreshnessPolicy<S> {
        &self.policy
    }

    pub fn summarizer(&self) -> &Summarizer<G> {
        &self.summarizer
    }

    pub fn gateway(&self) -> &M {
        &self.gateway
    }

    pub fn stats(&self) -> BotStats {
        self.stats.get_stats()
    }

    /// Never fails: every problem ends up either logged or as a notice in the chat.
    pub async fn handle(&self, chat_id: &str, text: &str) -> Outcome {
        let request_id = Uuid::new_v4();
        let span = info_span!("message", %request_id, chat_id);

        async {
            self.stats.inc_messages();
            match parse_command(text) {
                Command::Help => {
                    self.stats.inc_help();
                    self.deliver(chat_id, HELP_TEXT).await;
                    Outcome::Help
                }
                Command::Topic { topic, freshness } => {
                    let mode = freshness.map_or(self.default_mode, FreshnessMode::Fixed);
                    self.handle_topic(chat_id, &topic, mode).await
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn handle_topic(&self, chat_id: &str, topic: &str, mode: FreshnessMode) -> Outcome {
        if topic.trim().is_empty() {
            self.stats.inc_empty();
            info!("Empty topic, nothing to search");
            self.deliver(chat_id, &format!("No results found for topic: {}", topic))
                .await;
            return Outcome::NoResults;
        }

        let timer = OperationTimer::new("topic");
        let queries = self.resolver.resolve(topic);
        info!(
            topic,
            queries = queries.len(),
            region = self.resolver.is_region(topic),
            ?mode,
            "Resolving topic"
        );

        let results = self.policy.resolve(&queries, mode).await;
        self.stats.add_results(results.len());

        if results.is_empty() {
            self.stats.inc_empty();
            info!(topic, "No results at any freshness window");
            self.deliver(chat_id, &format!("No results found for topic: {}", topic))
                .await;
            timer.finish_with_count(0);
            return Outcome::NoResults;
        }

        let summary = self
            .summarizer
            .summarize(&results, &self.gateway, chat_id)
            .await;

        if summary.is_empty() {
            self.stats.inc_failures();
            timer.finish_with_count(results.len());
            return Outcome::Failed;
        }

        let outcome = if self.deliver(chat_id, &summary).await {
            self.stats.inc_summaries();
            Outcome::Summarized
        } else {
            self.stats.inc_failures();
            Outcome::Failed
        };
        timer.finish_with_count(results.len());
        outcome
    }

    async fn deliver(&self, chat_id: &str, text: &str) -> bool {
        match self.gateway.send(chat_id, text).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, chars = text.chars().count(), "Failed to send reply");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, SummaryStyle};
    use crate::llm::{NO_RESULTS_SENTINEL, SUMMARY_FAILED_NOTICE};
    use crate::models::FreshnessWindow;
    use crate::testing::{RecordingGateway, ScriptedSearch, StubGenerator};
    use pretty_assertions::assert_eq;

    fn pipeline(
        search: ScriptedSearch,
        generator: StubGenerator,
        gateway: RecordingGateway,
    ) -> TopicPipeline<ScriptedSearch, StubGenerator, RecordingGateway> {
        let regions = Config::default_config().regions;
        TopicPipeline::new(
            TopicResolver::new(regions),
            FreshnessPolicy::new(search, 1),
            Summarizer::new(generator, SummaryStyle::Grouped),
            gateway,
            FreshnessMode::Escalating,
        )
    }

    #[tokio::test]
    async fn test_region_topic_searches_every_country() {
        let search = ScriptedSearch::default()
            .with_results("Iran", FreshnessWindow::Day, 2)
            .with_results("Qatar", FreshnessWindow::Day, 1);
        let pipeline = pipeline(
            search,
            StubGenerator::replying("Topic: Iran\nSummary: Talks."),
            RecordingGateway::default(),
        );

        let outcome = pipeline.handle("42", "Middle East").await;

        assert_eq!(outcome, Outcome::Summarized);
        let calls = pipeline.policy().client().calls();
        assert_eq!(calls.len(), 14);
        assert!(calls.iter().all(|(_, window)| *window == FreshnessWindow::Day));
        assert_eq!(calls[0].0, "Saudi Arabia");
        assert_eq!(calls[13].0, "Qatar");

        let (_, payload) = pipeline.summarizer().generator().last_request().unwrap();
        let iran = payload.find("Iran 0").unwrap();
        let qatar = payload.find("Qatar 0").unwrap();
        assert!(iran < qatar);

        assert_eq!(
            pipeline.gateway().sent(),
            vec![("42".to_string(), "Topic: Iran\nSummary: Talks.".to_string())]
        );
    }

    #[tokio::test]
    async fn test_help_skips_search_and_generation() {
        let pipeline = pipeline(
            ScriptedSearch::default(),
            StubGenerator::replying("unused"),
            RecordingGateway::default(),
        );

        let outcome = pipeline.handle("7", "/help").await;

        assert_eq!(outcome, Outcome::Help);
        assert_eq!(pipeline.policy().client().call_count(), 0);
        assert_eq!(pipeline.summarizer().generator().call_count(), 0);
        assert_eq!(pipeline.gateway().sent(), vec![("7".to_string(), HELP_TEXT.to_string())]);
    }

    #[tokio::test]
    async fn test_period_suffix_forces_fixed_window() {
        let search =
            ScriptedSearch::default().with_results("quantum computing", FreshnessWindow::Week, 1);
        let pipeline = pipeline(
            search,
            StubGenerator::replying("Topic: Quantum computing"),
            RecordingGateway::default(),
        );

        let outcome = pipeline.handle("42", "quantum computing/week").await;

        assert_eq!(outcome, Outcome::Summarized);
        assert_eq!(
            pipeline.policy().client().calls(),
            vec![("quantum computing".to_string(), FreshnessWindow::Week)]
        );
    }

    #[tokio::test]
    async fn test_no_results_sends_notice_without_summarizing() {
        let pipeline = pipeline(
            ScriptedSearch::default(),
            StubGenerator::replying("unused"),
            RecordingGateway::default(),
        );

        let outcome = pipeline.handle("42", "obscure topic").await;

        assert_eq!(outcome, Outcome::NoResults);
        assert_eq!(pipeline.policy().client().call_count(), 5);
        assert_eq!(pipeline.summarizer().generator().call_count(), 0);

        let sent = pipeline.gateway().sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1, "No results found for topic: obscure topic");
        assert_ne!(sent[0].1, NO_RESULTS_SENTINEL);
    }

    #[tokio::test]
    async fn test_bare_period_suffix_skips_search() {
        let pipeline = pipeline(
            ScriptedSearch::default(),
            StubGenerator::replying("unused"),
            RecordingGateway::default(),
        );

        let outcome = pipeline.handle("42", "/week").await;

        assert_eq!(outcome, Outcome::NoResults);
        assert_eq!(pipeline.policy().client().call_count(), 0);
        assert_eq!(pipeline.summarizer().generator().call_count(), 0);
        assert_eq!(
            pipeline.gateway().sent(),
            vec![("42".to_string(), "No results found for topic: ".to_string())]
        );
    }

    #[tokio::test]
    async fn test_generation_failure_sends_only_the_notice() {
        let search = ScriptedSearch::default().with_results("Jordan", FreshnessWindow::Day, 1);
        let pipeline = pipeline(search, StubGenerator::failing(), RecordingGateway::default());

        let outcome = pipeline.handle("42", "Jordan").await;

        assert_eq!(outcome, Outcome::Failed);
        let sent = pipeline.gateway().sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1, SUMMARY_FAILED_NOTICE);
        assert_eq!(pipeline.stats().failures, 1);
    }

    #[tokio::test]
    async fn test_gateway_failure_is_not_propagated() {
        let search = ScriptedSearch::default().with_results("Oman", FreshnessWindow::Day, 1);
        let pipeline = pipeline(
            search,
            StubGenerator::replying("Topic: Oman"),
            RecordingGateway::failing(),
        );

        let outcome = pipeline.handle("42", "Oman").await;

        assert_eq!(outcome, Outcome::Failed);
        let stats = pipeline.stats();
        assert_eq!(stats.messages_handled, 1);
        assert_eq!(stats.summaries_sent, 0);
        assert_eq!(stats.results_found, 1);
    }
}
