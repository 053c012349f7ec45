//! feed — keep a sliding window over a live stream of numeric samples.
//!
//! Run with:  `RUST_LOG=info feed [path/to/feed.toml]`

use anyhow::{Context, Result};
use feed_config::{default_path, load as load_config, FeedConfig, SinkKind};
use feed_core::{FeedError, Parser, UpdateSink};
use feed_ingest::Controller;
use feed_sinks::{LogSink, SparklineSink};
use tracing_subscriber::EnvFilter;

/// Columns used by the sparkline renderer.
const SPARKLINE_WIDTH: usize = 60;

#[tokio::main]
async fn main() -> Result<()> {
    let path = std::env::args_os()
        .nth(1)
        .map(Into::into)
        .unwrap_or_else(default_path);

    // The config is read first so `log.level` can seed the filter.
    let config = load_config(&path);
    let level = config
        .as_ref()
        .map(|c| c.log.level.clone())
        .unwrap_or_else(|_| "info".to_string());

    // Structured logging — RUST_LOG controls verbosity (default: config `log.level`).
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .init();

    let config = config.with_context(|| format!("loading {}", path.display()))?;
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
    }
    tracing::info!("feed v{} starting", env!("CARGO_PKG_VERSION"));

    run(config).await
}

async fn run(config: FeedConfig) -> Result<()> {
    let mut controller = Controller::new(
        config.window.capacity,
        Parser::new(config.source.value_field.clone()),
    )?;

    let source = feed_source::open(&config.source.endpoint)
        .await
        .with_context(|| format!("opening {}", config.source.endpoint))?;

    let sink: Box<dyn UpdateSink> = match config.sink.kind {
        SinkKind::Sparkline => Box::new(SparklineSink::stdout(SPARKLINE_WIDTH)),
        SinkKind::Log => Box::new(LogSink::new()),
    };

    controller.start(source, sink)?;

    let outcome = tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal.context("installing Ctrl-C handler")?;
            tracing::info!("Interrupted; shutting down");
            controller.stop();
            controller.wait().await
        }
        outcome = controller.wait() => outcome,
    };

    match outcome {
        Ok(stats) => {
            tracing::info!(
                "Done: {} accepted, {} rejected, {} evicted",
                stats.accepted,
                stats.rejected(),
                stats.evicted
            );
            Ok(())
        }
        Err(FeedError::SourceClosed) => {
            tracing::info!(
                "Source closed; {} samples in window",
                controller.reader().snapshot().len()
            );
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
