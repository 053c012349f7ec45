//! Ready-made [`UpdateSink`](feed_core::UpdateSink) implementations.

pub mod log;
pub mod sparkline;

pub use log::LogSink;
pub use sparkline::{render, SparklineSink};
