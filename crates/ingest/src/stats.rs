use feed_core::ParseError;
use std::sync::atomic::{AtomicU64, Ordering};

/// Running counters for one ingestion loop, shared with its controller.
#[derive(Debug, Default)]
pub struct IngestStats {
    received:      AtomicU64,
    accepted:      AtomicU64,
    malformed:     AtomicU64,
    missing_field: AtomicU64,
    invalid_value: AtomicU64,
    evicted:       AtomicU64,
}

impl IngestStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_received(&self) {
        self.received.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_accepted(&self, evicted: usize) {
        self.accepted.fetch_add(1, Ordering::Relaxed);
        self.evicted.fetch_add(evicted as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_rejected(&self, error: &ParseError) {
        let counter = match error {
            ParseError::Malformed { .. } => &self.malformed,
            ParseError::MissingField { .. } => &self.missing_field,
            ParseError::InvalidValue { .. } => &self.invalid_value,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            received:      self.received.load(Ordering::Relaxed),
            accepted:      self.accepted.load(Ordering::Relaxed),
            malformed:     self.malformed.load(Ordering::Relaxed),
            missing_field: self.missing_field.load(Ordering::Relaxed),
            invalid_value: self.invalid_value.load(Ordering::Relaxed),
            evicted:       self.evicted.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`IngestStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Messages taken off the source.
    pub received:      u64,
    /// Messages parsed and appended to the window.
    pub accepted:      u64,
    pub malformed:     u64,
    pub missing_field: u64,
    pub invalid_value: u64,
    /// Samples pushed out of the window by newer ones.
    pub evicted:       u64,
}

impl StatsSnapshot {
    /// All rejected messages, regardless of reason.
    #[must_use]
    pub fn rejected(&self) -> u64 {
        self.malformed + self.missing_field + self.invalid_value
    }
}
