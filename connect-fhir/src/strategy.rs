use std::fmt::Write as _;

use chrono::{DateTime, FixedOffset, Utc};
use connect_core::{
    Accessory, ConnectConfig, DisplayItem, HealthSample, QuantityType, QuantityUnit, SampleType,
};

use crate::decoder::FhirDecoder;
use crate::display::clinical_item;
use crate::source::SourceView;

/// How the rows of a category are summarized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Decode the embedded FHIR resource.
    Clinical,
    /// Walking and running distance in whole meters.
    Distance,
    /// Step count.
    Steps,
    /// Category with no summary; every row is the error placeholder.
    Error,
}

/// Pick the summary strategy for a category.
pub fn classify(sample_type: &SampleType) -> Strategy {
    match sample_type {
        SampleType::Clinical(_) => Strategy::Clinical,
        SampleType::Quantity(QuantityType::DistanceWalkingRunning) => Strategy::Distance,
        SampleType::Quantity(QuantityType::StepCount) => Strategy::Steps,
        SampleType::Quantity(QuantityType::Other(_)) | SampleType::Other(_) => Strategy::Error,
    }
}

impl Strategy {
    pub fn display_item(self, sample: Option<&HealthSample>, config: &ConnectConfig) -> DisplayItem {
        match self {
            Self::Clinical => clinical_item(sample, &FhirDecoder::from_config(config)),
            Self::Distance => fitness_item(
                sample,
                QuantityType::DistanceWalkingRunning,
                QuantityUnit::Meter,
                "m",
                config,
            ),
            Self::Steps => fitness_item(
                sample,
                QuantityType::StepCount,
                QuantityUnit::Count,
                "Steps",
                config,
            ),
            Self::Error => DisplayItem::error_item(),
        }
    }

    /// Detail payload for a row, when the row can be opened.
    pub fn detail(self, sample: &HealthSample) -> Option<SourceView> {
        match self {
            Self::Clinical => sample
                .clinical_record()
                .and_then(|record| record.fhir_resource.clone())
                .map(SourceView::new),
            Self::Distance | Self::Steps | Self::Error => None,
        }
    }
}

fn fitness_item(
    sample: Option<&HealthSample>,
    expected: QuantityType,
    unit: QuantityUnit,
    label: &str,
    config: &ConnectConfig,
) -> DisplayItem {
    let Some(sample) = sample else {
        return DisplayItem::error_item();
    };
    if sample.sample_type != SampleType::Quantity(expected) {
        return DisplayItem::error_item();
    }
    let Some(value) = sample.quantity().and_then(|quantity| quantity.value_in(unit)) else {
        return DisplayItem::error_item();
    };

    // Whole units, truncated toward zero.
    let whole = value.trunc() as i64;
    DisplayItem::new(
        format!("{whole} {label}"),
        Some(format_timestamp(
            sample.start_date,
            config.utc_offset(),
            &config.timestamp_format,
        )),
        Accessory::None,
    )
}

/// Formats in the given offset with the configured pattern, falling back to
/// RFC 3339 when the pattern is invalid.
pub fn format_timestamp(timestamp: DateTime<Utc>, offset: FixedOffset, pattern: &str) -> String {
    let local = timestamp.with_timezone(&offset);
    let mut formatted = String::new();
    match write!(formatted, "{}", local.format(pattern)) {
        Ok(()) => formatted,
        Err(_) => local.to_rfc3339(),
    }
}
