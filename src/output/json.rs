//! JSON output formatting

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Wrapper for JSON output with metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T> {
    /// Operation that produced the result
    pub operation: String,

    /// Always true; failures are reported on stderr with a non-zero exit
    pub success: bool,

    /// The actual data
    pub data: T,

    /// Metadata about the response
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct Metadata {
    /// Timestamp of the response
    pub timestamp: String,

    /// CLI version
    pub version: String,
}

impl<T> JsonOutput<T> {
    /// Create a new JSON output with metadata
    pub fn new(operation: &str, data: T) -> Self {
        Self {
            operation: operation.to_string(),
            success: true,
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

/// Format data as pretty-printed JSON
pub fn format_json<T: Serialize + ?Sized>(
    operation: &str,
    data: &T,
) -> Result<String, serde_json::Error> {
    let output = JsonOutput::new(operation, data);
    serde_json::to_string_pretty(&output)
}
