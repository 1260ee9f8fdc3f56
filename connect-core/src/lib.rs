//! Shared data model for browsing health records: samples, display items,
//! categories and the health store seam.

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

mod category;
mod display;
mod sample;
mod store;

pub use category::Section;
pub use display::{Accessory, DisplayItem};
pub use sample::{
    ClinicalRecord, ClinicalType, FhirRelease, FhirResourcePayload, FhirVersion, HealthSample,
    Quantity, QuantitySample, QuantityType, QuantityUnit, ResourceType, SampleKind, SampleType,
};
pub use store::{AuthorizationStatus, HealthStore, MemoryStore, SampleExport};

/// Runtime settings shared by the decoder, the fitness strategies and queries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConnectConfig {
    /// Whether the runtime understands FHIR R4 payloads. When it does not,
    /// payloads without a recognised release are read as DSTU2.
    pub r4_supported: bool,
    /// Maximum number of samples fetched per category query.
    pub query_limit: usize,
    /// `chrono` format string for sample timestamps (short date, medium time).
    pub timestamp_format: String,
    /// Offset from UTC, in minutes, that sample timestamps are shown in.
    /// Hosts set it to the device's local offset; the default is UTC.
    pub utc_offset_minutes: i32,
}

impl ConnectConfig {
    /// Display offset for timestamps. Offsets beyond a day are ignored.
    pub fn utc_offset(&self) -> FixedOffset {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix())
    }
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            r4_supported: true,
            query_limit: 100,
            timestamp_format: "%-m/%-d/%y, %-I:%M:%S %p".to_string(),
            utc_offset_minutes: 0,
        }
    }
}

/// Query-level failures. These block the screen, unlike per-row decode
/// failures which end up in the row subtitle.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Authorization to read health data was denied")]
    AuthorizationDenied,
    #[error("Not authorized to read {0}")]
    NotAuthorized(String),
    #[error("Health store query failed: {0}")]
    Query(String),
    #[error("Could not read health data export: {0}")]
    Parse(String),
}
