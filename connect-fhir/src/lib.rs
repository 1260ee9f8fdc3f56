//! Clinical record summaries from HealthKit-style FHIR payloads.
//!
//! A payload is decoded against the full model of its declared FHIR release
//! (DSTU2 or R4). Producers often emit resources that are almost conformant,
//! so a failed full decode is retried once against a partial schema that only
//! requires what the category list displays.

use connect_core::{ConnectConfig, DisplayItem, HealthSample, StoreError};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

pub mod datatypes;
mod decoder;
mod display;
pub mod dstu2;
mod listing;
pub mod partial;
pub mod r4;
mod source;
mod strategy;
mod subtitle;

pub use connect_core::FhirRelease;
pub use decoder::{DecodedResource, DecodingError, FhirDecoder, ResourceKind};
pub use display::{build_item, clinical_item};
pub use listing::{CategoryListing, QueryTicket};
pub use source::{pretty_source, unescape_json_string, SourceView, SourceViewError, SOURCE_TITLE};
pub use strategy::{classify, format_timestamp, Strategy};
pub use subtitle::Subtitle;

/// Summarize a JSON array of samples into display rows.
pub fn summarize_samples_str(
    samples_json: &str,
    config: &ConnectConfig,
) -> Result<Vec<DisplayItem>, StoreError> {
    let value: Value =
        serde_json::from_str(samples_json).map_err(|err| StoreError::Parse(err.to_string()))?;
    summarize_samples_value(&value, config)
}

/// Summarize a `serde_json::Value` array of samples into display rows.
///
/// Each sample is summarized with the strategy of its own type. An entry that
/// is not a readable sample becomes the error placeholder.
pub fn summarize_samples_value(
    samples: &Value,
    config: &ConnectConfig,
) -> Result<Vec<DisplayItem>, StoreError> {
    let entries = samples
        .as_array()
        .ok_or_else(|| StoreError::Parse("expected an array of samples".to_string()))?;

    Ok(entries
        .iter()
        .map(|entry| match HealthSample::deserialize(entry) {
            Ok(sample) => classify(&sample.sample_type).display_item(Some(&sample), config),
            Err(err) => {
                warn!(error = %err, "unreadable sample");
                DisplayItem::error_item()
            }
        })
        .collect())
}
