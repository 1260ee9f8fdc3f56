//! Raw FHIR source shown when a record is opened.

use connect_core::FhirResourcePayload;
use serde_json::Value;

pub const SOURCE_TITLE: &str = "FHIR Source";

#[derive(Debug, thiserror::Error)]
pub enum SourceViewError {
    #[error("Unable to display FHIR source: {0}")]
    Json(#[from] serde_json::Error),
}

/// Detail payload for a clinical record.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceView {
    pub title: String,
    pub payload: FhirResourcePayload,
}

impl SourceView {
    pub fn new(payload: FhirResourcePayload) -> Self {
        Self {
            title: SOURCE_TITLE.to_string(),
            payload,
        }
    }

    /// Pretty-printed, unescaped JSON text of the payload.
    pub fn render(&self) -> Result<String, SourceViewError> {
        Ok(unescape_json_string(&pretty_source(&self.payload.data)?))
    }
}

/// Re-encode JSON bytes with two-space indentation, keeping key order.
pub fn pretty_source(data: &[u8]) -> Result<String, serde_json::Error> {
    let value: Value = serde_json::from_slice(data)?;
    serde_json::to_string_pretty(&value)
}

/// Turns `\/` back into `/` and `\\` into `\` for display.
pub fn unescape_json_string(text: &str) -> String {
    text.replace("\\/", "/").replace("\\\\", "\\")
}
