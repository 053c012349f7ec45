use crate::error::ParseError;
use crate::sample::Sample;
use serde_json::Value;

/// Key holding the reading in an inbound JSON object.
pub const DEFAULT_VALUE_FIELD: &str = "value";

/// Turns raw inbound messages into [`Sample`]s.
///
/// Messages are JSON objects such as `{"value": 42.5}`; any other keys are
/// ignored.
#[derive(Debug, Clone)]
pub struct Parser {
    field: String,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(DEFAULT_VALUE_FIELD)
    }
}

impl Parser {
    pub fn new(field: impl Into<String>) -> Self {
        Self { field: field.into() }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Parse one message, stamping the result with the current time.
    pub fn parse(&self, raw: &[u8]) -> Result<Sample, ParseError> {
        let lossy = || String::from_utf8_lossy(raw).into_owned();

        let doc: Value = serde_json::from_slice(raw).map_err(|e| ParseError::Malformed {
            raw:    lossy(),
            reason: e.to_string(),
        })?;

        // Non-object JSON (`[1]`, `3`, `"x"`) has no fields at all.
        let Some(found) = doc.as_object().and_then(|obj| obj.get(&self.field)) else {
            return Err(ParseError::MissingField {
                raw:   lossy(),
                field: self.field.clone(),
            });
        };

        let value = found.as_f64().ok_or_else(|| ParseError::InvalidValue {
            raw:   lossy(),
            field: self.field.clone(),
        })?;

        Ok(Sample::now(value))
    }
}

/// Parse `raw` with the default `"value"` field.
pub fn parse(raw: &[u8]) -> Result<Sample, ParseError> {
    Parser::default().parse(raw)
}
