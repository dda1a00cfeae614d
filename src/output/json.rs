//! JSON output: API models wrapped in a `{data, meta}` envelope

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Envelope printed by `--format json`.
///
/// `data` holds the TestRail models untouched, custom fields included, so
/// scripts can read what the API returned.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T> {
    pub data: T,
    pub meta: Metadata,
}

/// When and by which testrail-bridge build the output was produced
#[derive(Debug, Serialize, Deserialize)]
pub struct Metadata {
    /// RFC 3339, second precision, UTC
    pub timestamp: String,
    pub version: String,
}

impl Metadata {
    fn at(now: DateTime<Utc>) -> Self {
        Self {
            timestamp: now.to_rfc3339_opts(SecondsFormat::Secs, true),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl<T> JsonOutput<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata::at(Utc::now()),
        }
    }
}

/// Pretty-printed envelope around `data`
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data))
}
