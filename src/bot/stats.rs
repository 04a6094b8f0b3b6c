// file: src/bot/stats.rs
// description: counters for handled messages and their outcomes
// reference: atomic counters snapshotted into a plain stats struct

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct BotStats {
    pub messages_handled: usize,
    pub help_requests: usize,
    pub summaries_sent: usize,
    pub empty_topics: usize,
    pub failures: usize,
    pub results_found: usize,
    pub uptime_secs: u64,
}

impl BotStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of topic requests that ended in a delivered summary.
    pub fn success_rate(&self) -> f64 {
        let topics = self.summaries_sent + self.empty_topics + self.failures;
        if topics == 0 {
            return 0.0;
        }
        (self.summaries_sent as f64 / topics as f64) * 100.0
    }

    pub fn messages_per_minute(&self) -> f64 {
        if self.uptime_secs == 0 {
            return 0.0;
        }
        self.messages_handled as f64 * 60.0 / self.uptime_secs as f64
    }
}

pub struct StatsTracker {
    messages_handled: AtomicUsize,
    help_requests: AtomicUsize,
    summaries_sent: AtomicUsize,
    empty_topics: AtomicUsize,
    failures: AtomicUsize,
    results_found: AtomicUsize,
    start_time: Instant,
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsTracker {
    pub fn new() -> Self {
        Self {
            messages_handled: AtomicUsize::new(0),
            help_requests: AtomicUsize::new(0),
            summaries_sent: AtomicUsize::new(0),
            empty_topics: AtomicUsize::new(0),
            failures: AtomicUsize::new(0),
            results_found: AtomicUsize::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn inc_messages(&self) {
        self.messages_handled.fetch_add(1, Ordering::SeqCst);
    }

    pub fn inc_help(&self) {
        self.help_requests.fetch_add(1, Ordering::SeqCst);
    }

    pub fn inc_summaries(&self) {
        self.summaries_sent.fetch_add(1, Ordering::SeqCst);
    }

    pub fn inc_empty(&self) {
        self.empty_topics.fetch_add(1, Ordering::SeqCst);
    }

    pub fn inc_failures(&self) {
        self.failures.fetch_add(1, Ordering::SeqCst);
    }

    pub fn add_results(&self, count: usize) {
        self.results_found.fetch_add(count, Ordering::SeqCst);
    }

    pub fn get_stats(&self) -> BotStats {
        BotStats {
            messages_handled: self.messages_handled.load(Ordering::SeqCst),
            help_requests: self.help_requests.load(Ordering::SeqCst),
            summaries_sent: self.summaries_sent.load(Ordering::SeqCst),
            empty_topics: self.empty_topics.load(Ordering::SeqCst),
            failures: self.failures.load(Ordering::SeqCst),
            results_found: self.results_found.load(Ordering::SeqCst),
            uptime_secs: self.start_time.elapsed().as_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_stats_calculations() {
        let stats = BotStats {
            messages_handled: 10,
            help_requests: 2,
            summaries_sent: 6,
            empty_topics: 1,
            failures: 1,
            results_found: 40,
            uptime_secs: 120,
        };

        assert_eq!(stats.messages_per_minute(), 5.0);
        assert_eq!(stats.success_rate(), 75.0);
    }

    #[test]
    fn test_bot_stats_zero_values() {
        let stats = BotStats::new();
        assert_eq!(stats.messages_per_minute(), 0.0);
        assert_eq!(stats.success_rate(), 0.0);
    }

    #[test]
    fn test_tracker_counts() {
        let tracker = StatsTracker::new();

        tracker.inc_messages();
        tracker.inc_messages();
        tracker.inc_help();
        tracker.inc_summaries();
        tracker.add_results(14);

        let stats = tracker.get_stats();
        assert_eq!(stats.messages_handled, 2);
        assert_eq!(stats.help_requests, 1);
        assert_eq!(stats.summaries_sent, 1);
        assert_eq!(stats.results_found, 14);
        assert_eq!(stats.failures, 0);
    }
}
