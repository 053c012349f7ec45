use feed_core::{ParseError, UpdateSink, WindowUpdate};
use tracing::{debug, info};

/// Logs every window update at `info`.
#[derive(Debug, Default)]
pub struct LogSink;

impl LogSink {
    pub fn new() -> Self {
        Self
    }
}

impl UpdateSink for LogSink {
    fn on_update(&mut self, update: &WindowUpdate) {
        info!(
            "[{}] {:.3}  window {}/{}{}",
            update.sample.timestamp().format("%H:%M:%S%.3f"),
            update.sample.value(),
            update.snapshot.len(),
            update.capacity,
            if update.is_full() { " (evicting)" } else { "" },
        );
    }

    fn on_parse_error(&mut self, error: &ParseError) {
        debug!("Rejected message: {error}");
    }
}
