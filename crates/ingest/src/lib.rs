//! The ingestion loop and the controller that runs it.

pub mod controller;
pub mod pipeline;
pub mod stats;

#[cfg(test)]
mod testing;

pub use controller::Controller;
pub use pipeline::IngestionLoop;
pub use stats::{IngestStats, StatsSnapshot};
