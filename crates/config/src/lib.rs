pub mod schema;

pub use schema::{FeedConfig, LogConfig, SinkConfig, SinkKind, SourceConfig, WindowConfig};

use feed_core::{FeedError, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `FeedConfig::default()` if
/// the file doesn't exist so the pipeline always has sensible defaults.
///
/// Runs before logging is set up, so callers report the missing file.
pub fn load(path: impl AsRef<Path>) -> Result<FeedConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(FeedConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| FeedError::Config(format!("cannot read '{}': {e}", path.display())))?;

    from_str(&raw)
}

/// Parse and validate a TOML document.
pub fn from_str(raw: &str) -> Result<FeedConfig> {
    let config: FeedConfig =
        toml::from_str(raw).map_err(|e| FeedError::Config(format!("TOML parse error: {e}")))?;
    config.validate()?;
    Ok(config)
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("feed").join("feed.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_setup() {
        let config = FeedConfig::default();
        assert_eq!(config.window.capacity, 100);
        assert_eq!(config.source.endpoint, "ws://localhost:8765");
        assert_eq!(config.source.value_field, "value");
        assert_eq!(config.sink.kind, SinkKind::Sparkline);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(from_str("").unwrap(), FeedConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = from_str(
            r#"
            [window]
            capacity = 3

            [sink]
            kind = "log"
            "#,
        )
        .unwrap();
        assert_eq!(config.window.capacity, 3);
        assert_eq!(config.sink.kind, SinkKind::Log);
        assert_eq!(config.source, SourceConfig::default());
    }

    #[test]
    fn zero_capacity_is_invalid() {
        assert!(matches!(
            from_str("[window]\ncapacity = 0\n"),
            Err(FeedError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn empty_value_field_is_invalid() {
        assert!(matches!(
            from_str("[source]\nvalue_field = \"\"\n"),
            Err(FeedError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn bad_toml_is_config_error() {
        assert!(matches!(from_str("[window"), Err(FeedError::Config(_))));
        assert!(matches!(
            from_str("[window]\ncapacity = -1\n"),
            Err(FeedError::Config(_))
        ));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load("/nonexistent/feed/feed.toml").unwrap();
        assert_eq!(config, FeedConfig::default());
    }

    #[test]
    fn default_path_ends_with_feed_toml() {
        assert!(default_path().ends_with("feed/feed.toml"));
    }
}
