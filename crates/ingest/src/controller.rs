use crate::pipeline::IngestionLoop;
use crate::stats::{IngestStats, StatsSnapshot};
use feed_core::{FeedError, Parser, Phase, Result, RunState, UpdateSink};
use feed_source::Source;
use feed_window::{SlidingWindow, WindowReader};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Starts, stops and awaits a single [`IngestionLoop`].
///
/// A controller is single-use: once its loop has stopped, for whatever
/// reason, `start` returns [`FeedError::Finished`]. Dropping the controller
/// stops the loop.
pub struct Controller {
    state:   Arc<RunState>,
    cancel:  CancellationToken,
    stats:   Arc<IngestStats>,
    reader:  WindowReader,
    pending: Option<IngestionLoop>,
    task:    Option<JoinHandle<Result<StatsSnapshot>>>,
}

impl Controller {
    /// Build an idle controller with a window of `capacity` samples.
    pub fn new(capacity: usize, parser: Parser) -> Result<Self> {
        let ingest = IngestionLoop::new(SlidingWindow::new(capacity)?, parser);

        Ok(Self {
            state:   ingest.state(),
            cancel:  ingest.cancel_token(),
            stats:   ingest.stats(),
            reader:  ingest.reader(),
            pending: Some(ingest),
            task:    None,
        })
    }

    /// Spawn the loop on the current Tokio runtime.
    ///
    /// Fails with [`FeedError::AlreadyRunning`] while running and
    /// [`FeedError::Finished`] once stopped.
    pub fn start<S, K>(&mut self, source: S, sink: K) -> Result<()>
    where
        S: Source + 'static,
        K: UpdateSink + 'static,
    {
        match self.state.start() {
            Ok(()) => {}
            Err(Phase::Running) => return Err(FeedError::AlreadyRunning),
            Err(_) => return Err(FeedError::Finished),
        }

        let ingest = self.pending.take().ok_or(FeedError::Finished)?;
        info!("Starting ingestion from {}", source.endpoint());
        self.task = Some(tokio::spawn(ingest.run(source, sink)));
        Ok(())
    }

    /// Request a stop and interrupt any pending receive.
    ///
    /// No-op unless the loop is running.
    pub fn stop(&self) {
        if self.state.stop() {
            info!("Stopping ingestion");
            self.cancel.cancel();
        }
    }

    /// Wait for the loop to end and return its outcome.
    ///
    /// `Ok` carries the final counters after a requested stop; source
    /// failures come back as errors. Without a started loop this returns the
    /// current counters immediately.
    ///
    /// Cancel-safe: dropping the returned future leaves the loop attached, so
    /// `wait` can be called again.
    pub async fn wait(&mut self) -> Result<StatsSnapshot> {
        let Some(task) = self.task.as_mut() else {
            return Ok(self.stats.snapshot());
        };

        let joined = task.await;
        self.task = None;
        // A panicked loop never reached its own shutdown path.
        self.state.finish();
        joined.map_err(|e| FeedError::Task(e.to_string()))?
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Read-only view of the window, usable from any task.
    pub fn reader(&self) -> WindowReader {
        self.reader.clone()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.stop();
    }
}
