use feed_core::{FeedError, Result, DEFAULT_VALUE_FIELD};
use serde::{Deserialize, Serialize};

/// Root configuration structure parsed from `feed.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub window: WindowConfig,
    pub source: SourceConfig,
    pub sink:   SinkConfig,
    pub log:    LogConfig,
}

impl FeedConfig {
    /// Reject values that would only fail later at runtime.
    pub fn validate(&self) -> Result<()> {
        if self.window.capacity == 0 {
            return Err(FeedError::InvalidConfiguration(
                "window.capacity must be at least 1".into(),
            ));
        }
        if self.source.endpoint.trim().is_empty() {
            return Err(FeedError::InvalidConfiguration(
                "source.endpoint must not be empty".into(),
            ));
        }
        if self.source.value_field.is_empty() {
            return Err(FeedError::InvalidConfiguration(
                "source.value_field must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Sliding window settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Number of most recent samples kept.
    pub capacity: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { capacity: 100 }
    }
}

/// Where samples come from and how they are read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// `ws://`, `tcp://` or `unix://` address.
    pub endpoint:    String,
    /// JSON key holding the numeric reading.
    pub value_field: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint:    "ws://localhost:8765".to_string(),
            value_field: DEFAULT_VALUE_FIELD.to_string(),
        }
    }
}

/// Which consumer receives window updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    pub kind: SinkKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Redraw a one-line sparkline on stdout.
    #[default]
    Sparkline,
    /// Log every update.
    Log,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}
