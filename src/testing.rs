// file: src/testing.rs
// description: in-memory doubles for the search, generation, gateway and update seams
// reference: used by unit tests only

use crate::bot::UpdateSource;
use crate::error::{PipelineError, Result};
use crate::gateway::MessageGateway;
use crate::gateway::telegram::{Chat, IncomingMessage, Update};
use crate::llm::TextGenerator;
use crate::models::{FreshnessWindow, SearchResult};
use crate::search::NewsSearch;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Search backend answering from a fixed script. Unscripted calls find nothing.
#[derive(Default)]
pub struct ScriptedSearch {
    results: HashMap<(String, FreshnessWindow), Vec<SearchResult>>,
    failures: HashMap<String, String>,
    calls: Mutex<Vec<(String, FreshnessWindow)>>,
}

impl ScriptedSearch {
    /// `count` results titled "{query} 0", "{query} 1", ... for `query` at `window`.
    pub fn with_results(mut self, query: &str, window: FreshnessWindow, count: usize) -> Self {
        let results = (0..count)
            .map(|i| {
                SearchResult::new(
                    query,
                    format!("{} {}", query, i),
                    format!("Coverage of {} number {}", query, i),
                    "2 hours ago",
                    vec![],
                    format!("https://news.example/{}/{}", query.replace(' ', "-"), i),
                )
            })
            .collect();
        self.results.insert((query.to_string(), window), results);
        self
    }

    /// Every search for `query` fails with a network error.
    pub fn with_network_error(mut self, query: &str, message: &str) -> Self {
        self.failures.insert(query.to_string(), message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<(String, FreshnessWindow)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl NewsSearch for ScriptedSearch {
    async fn search(&self, query: &str, freshness: FreshnessWindow) -> Result<Vec<SearchResult>> {
        self.calls.lock().unwrap().push((query.to_string(), freshness));

        if let Some(message) = self.failures.get(query) {
            return Err(PipelineError::Network(message.clone()));
        }

        Ok(self
            .results
            .get(&(query.to_string(), freshness))
            .cloned()
            .unwrap_or_default())
    }
}

/// Text generator with a canned reply (or a canned failure).
pub struct StubGenerator {
    reply: Option<String>,
    requests: Mutex<Vec<(String, String)>>,
}

impl StubGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<(String, String)> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl TextGenerator for StubGenerator {
    async fn generate(&self, system: &str, user: &str) -> Result<String> {
        self.requests
            .lock()
            .unwrap()
            .push((system.to_string(), user.to_string()));

        self.reply
            .clone()
            .ok_or_else(|| PipelineError::Network("Groq API request failed with status 503".to_string()))
    }
}

/// Gateway that keeps every message instead of sending it.
#[derive(Default)]
pub struct RecordingGateway {
    sent: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingGateway {
    /// Records nothing and rejects every send.
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl MessageGateway for RecordingGateway {
    async fn send(&self, chat_id: &str, text: &str) -> Result<()> {
        if self.fail {
            return Err(PipelineError::Network("gateway unavailable".to_string()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((chat_id.to_string(), text.to_string()));
        Ok(())
    }
}

/// Update source replaying scripted batches, then empty polls.
#[derive(Default)]
pub struct ScriptedUpdates {
    batches: Mutex<VecDeque<Result<Vec<Update>>>>,
    offsets: Mutex<Vec<Option<i64>>>,
}

impl ScriptedUpdates {
    pub fn with_batch(self, updates: Vec<Update>) -> Self {
        self.batches.lock().unwrap().push_back(Ok(updates));
        self
    }

    pub fn with_failure(self, message: &str) -> Self {
        self.batches
            .lock()
            .unwrap()
            .push_back(Err(PipelineError::Network(message.to_string())));
        self
    }

    /// The offset passed to each poll, in order.
    pub fn offsets(&self) -> Vec<Option<i64>> {
        self.offsets.lock().unwrap().clone()
    }
}

impl UpdateSource for ScriptedUpdates {
    async fn poll(&self, offset: Option<i64>) -> Result<Vec<Update>> {
        self.offsets.lock().unwrap().push(offset);
        self.batches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

pub fn text_update(update_id: i64, chat_id: i64, text: &str) -> Update {
    Update {
        update_id,
        message: Some(IncomingMessage {
            chat: Chat { id: chat_id },
            text: Some(text.to_string()),
        }),
    }
}

/// An update carrying no text, e.g. a sticker or a photo.
pub fn non_text_update(update_id: i64, chat_id: i64) -> Update {
    Update {
        update_id,
        message: Some(IncomingMessage {
            chat: Chat { id: chat_id },
            text: None,
        }),
    }
}
