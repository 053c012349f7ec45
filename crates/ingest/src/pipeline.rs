use crate::stats::{IngestStats, StatsSnapshot};
use feed_core::{FeedError, Parser, Result, RunState, UpdateSink, WindowUpdate};
use feed_source::Source;
use feed_window::{SharedWindow, SlidingWindow, WindowReader};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Receive → parse → append → notify, one message at a time.
///
/// The loop owns the window; everyone else reads it through a
/// [`WindowReader`]. Receiving is the only await point, so a slow sink holds
/// back the next receive instead of building a queue.
pub struct IngestionLoop {
    window: SharedWindow,
    parser: Parser,
    state:  Arc<RunState>,
    cancel: CancellationToken,
    stats:  Arc<IngestStats>,
}

impl IngestionLoop {
    pub fn new(window: SlidingWindow, parser: Parser) -> Self {
        let (window, _) = SharedWindow::new(window);
        Self {
            window,
            parser,
            state:  Arc::new(RunState::new()),
            cancel: CancellationToken::new(),
            stats:  Arc::new(IngestStats::new()),
        }
    }

    pub fn reader(&self) -> WindowReader {
        self.window.reader()
    }

    /// Run/stop flag. [`run`](Self::run) returns at once unless this is `Running`.
    pub fn state(&self) -> Arc<RunState> {
        Arc::clone(&self.state)
    }

    /// Cancelling this token interrupts a pending receive.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn stats(&self) -> Arc<IngestStats> {
        Arc::clone(&self.stats)
    }

    /// Drive the loop until the state leaves `Running` or the source ends.
    ///
    /// A requested stop returns the final counters. A closed or failing
    /// source returns [`FeedError::SourceClosed`] / [`FeedError::Source`];
    /// either way the state ends up `Stopped`.
    pub async fn run<S, K>(mut self, mut source: S, mut sink: K) -> Result<StatsSnapshot>
    where
        S: Source,
        K: UpdateSink,
    {
        info!(
            "Ingesting `{}` from {} (window capacity {})",
            self.parser.field(),
            source.endpoint(),
            self.window.window().capacity()
        );

        let outcome = loop {
            if !self.state.is_running() {
                break Ok(());
            }

            let received = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break Ok(()),
                received = source.receive() => received,
            };

            let raw = match received {
                Ok(Some(raw)) => raw,
                Ok(None) => {
                    warn!("Source {} closed", source.endpoint());
                    break Err(FeedError::SourceClosed);
                }
                Err(e) => {
                    error!("Source {} failed: {e}", source.endpoint());
                    break Err(e);
                }
            };

            // The receive may have completed just after a stop request.
            if !self.state.is_running() {
                debug!("Discarding message received after stop");
                break Ok(());
            }

            self.process(&raw, &mut sink);
        };

        self.state.finish();
        let stats = self.stats.snapshot();
        info!(
            "Ingestion stopped: {} received, {} accepted, {} rejected",
            stats.received,
            stats.accepted,
            stats.rejected()
        );

        outcome.map(|()| stats)
    }

    fn process<K: UpdateSink>(&mut self, raw: &[u8], sink: &mut K) {
        self.stats.record_received();

        match self.parser.parse(raw) {
            Ok(sample) => {
                let (snapshot, evicted) = self.window.append(sample);
                self.stats.record_accepted(evicted);
                debug!("Appended {} (window {})", sample.value(), snapshot.len());

                sink.on_update(&WindowUpdate {
                    sample,
                    snapshot,
                    capacity: self.window.window().capacity(),
                });
            }
            Err(e) => {
                self.stats.record_rejected(&e);
                warn!("Dropping {} message: {e}", e.kind());
                sink.on_parse_error(&e);
            }
        }
    }
}
