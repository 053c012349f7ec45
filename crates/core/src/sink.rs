use crate::{error::ParseError, sample::Sample, snapshot::Snapshot};

/// What a sink receives after every accepted sample.
#[derive(Debug, Clone)]
pub struct WindowUpdate {
    /// The sample that was just appended.
    pub sample:   Sample,
    /// Window contents after the append, oldest first.
    pub snapshot: Snapshot,
    /// Fixed capacity of the window.
    pub capacity: usize,
}

impl WindowUpdate {
    /// `true` once the window has filled and each append evicts.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.snapshot.len() == self.capacity
    }
}

/// Downstream consumer of window updates (chart, log, exporter…).
///
/// Calls happen on the ingestion task, in receipt order, and must return
/// before the next message is received. A slow sink slows ingestion down
/// rather than queueing updates.
pub trait UpdateSink: Send {
    /// Called exactly once per accepted sample, after it has been appended.
    fn on_update(&mut self, update: &WindowUpdate);

    /// Called for every rejected message. The window is untouched.
    fn on_parse_error(&mut self, _error: &ParseError) {}
}

impl<S: UpdateSink + ?Sized> UpdateSink for Box<S> {
    fn on_update(&mut self, update: &WindowUpdate) {
        (**self).on_update(update);
    }

    fn on_parse_error(&mut self, error: &ParseError) {
        (**self).on_parse_error(error);
    }
}
