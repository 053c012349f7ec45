use thiserror::Error;

/// Top-level error type used across the entire pipeline.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("source error: {0}")]
    Source(String),

    #[error("source closed")]
    SourceClosed,

    #[error("ingestion already running")]
    AlreadyRunning,

    /// The loop has reached `Stopped`; a fresh controller is needed to ingest again.
    #[error("ingestion already finished")]
    Finished,

    #[error("ingestion task failed: {0}")]
    Task(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl FeedError {
    /// `true` for the conditions that end an ingestion loop from the source side.
    #[must_use]
    pub fn is_source_failure(&self) -> bool {
        matches!(self, Self::Source(_) | Self::SourceClosed)
    }
}

pub type Result<T, E = FeedError> = std::result::Result<T, E>;

/// Why a single inbound message was rejected.
///
/// Parse errors never stop ingestion; they are logged, counted and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The message is not decodable JSON.
    #[error("malformed message: {reason} (raw: {raw:?})")]
    Malformed { raw: String, reason: String },

    /// Valid JSON that does not carry the value field.
    #[error("missing field `{field}` (raw: {raw:?})")]
    MissingField { raw: String, field: String },

    /// The value field is present but is not a number.
    #[error("field `{field}` is not a number (raw: {raw:?})")]
    InvalidValue { raw: String, field: String },
}

impl ParseError {
    /// The offending message, lossily decoded for diagnostics.
    pub fn raw(&self) -> &str {
        match self {
            Self::Malformed { raw, .. }
            | Self::MissingField { raw, .. }
            | Self::InvalidValue { raw, .. } => raw,
        }
    }

    /// Short, stable label used in logs and counters.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Malformed { .. } => "malformed",
            Self::MissingField { .. } => "missing_field",
            Self::InvalidValue { .. } => "invalid_value",
        }
    }
}
