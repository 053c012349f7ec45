pub mod error;
pub mod parser;
pub mod sample;
pub mod sink;
pub mod snapshot;
pub mod state;

pub use error::{FeedError, ParseError, Result};
pub use parser::{parse, Parser, DEFAULT_VALUE_FIELD};
pub use sample::Sample;
pub use sink::{UpdateSink, WindowUpdate};
pub use snapshot::Snapshot;
pub use state::{Phase, RunState};
