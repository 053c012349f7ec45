//! Sinks and sources shared by the crate's tests.

use async_trait::async_trait;
use feed_core::{FeedError, ParseError, Result, UpdateSink, WindowUpdate};
use feed_source::Source;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Records every notification it receives.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    updates: Arc<Mutex<Vec<(f64, Vec<f64>)>>>,
    errors:  Arc<Mutex<Vec<&'static str>>>,
}

impl Recorder {
    /// `(appended value, window values)` per update.
    pub fn updates(&self) -> Vec<(f64, Vec<f64>)> {
        self.updates.lock().unwrap().clone()
    }

    /// Parse error kinds, in order.
    pub fn errors(&self) -> Vec<&'static str> {
        self.errors.lock().unwrap().clone()
    }
}

impl UpdateSink for Recorder {
    fn on_update(&mut self, update: &WindowUpdate) {
        let values = update.snapshot.values().collect();
        self.updates.lock().unwrap().push((update.sample.value(), values));
    }

    fn on_parse_error(&mut self, error: &ParseError) {
        self.errors.lock().unwrap().push(error.kind());
    }
}

/// Yields its messages, then fails.
pub struct FailingSource {
    messages: VecDeque<Vec<u8>>,
}

impl FailingSource {
    pub fn after(messages: Vec<Vec<u8>>) -> Self {
        Self { messages: messages.into() }
    }
}

#[async_trait]
impl Source for FailingSource {
    async fn receive(&mut self) -> Result<Option<Vec<u8>>> {
        match self.messages.pop_front() {
            Some(msg) => Ok(Some(msg)),
            None => Err(FeedError::Source("connection reset".into())),
        }
    }

    fn endpoint(&self) -> &str {
        "failing"
    }
}
