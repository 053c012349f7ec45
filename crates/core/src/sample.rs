use chrono::{DateTime, Local};

/// One numeric reading, stamped when it was received.
///
/// The timestamp is assigned locally at receipt time; whatever clock the
/// remote source has is ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    timestamp: DateTime<Local>,
    value:     f64,
}

impl Sample {
    pub fn new(timestamp: DateTime<Local>, value: f64) -> Self {
        Self { timestamp, value }
    }

    /// Stamp `value` with the current local time.
    pub fn now(value: f64) -> Self {
        Self::new(Local::now(), value)
    }

    #[must_use]
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }
}
