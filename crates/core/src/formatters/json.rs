use crate::merge::NormalizedRecord;
use crate::Result;

/// Configuration for JSON output
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Pretty print JSON output
    pub pretty: bool,
}

/// Serialize a record as JSON, keyed by canonical type name
pub fn record_to_json(record: &NormalizedRecord, pretty: bool) -> Result<String> {
    if pretty { Ok(serde_json::to_string_pretty(record)?) } else { Ok(serde_json::to_string(record)?) }
}

/// Serialize a record as a `serde_json::Value`
pub fn record_to_value(record: &NormalizedRecord) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(record)?)
}

/// JSON formatter with configurable options
pub struct JsonFormatter {
    config: JsonConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, record: &NormalizedRecord) -> Result<String> {
        record_to_json(record, self.config.pretty)
    }
}
