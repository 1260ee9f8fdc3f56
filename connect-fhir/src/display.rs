use connect_core::{Accessory, ClinicalRecord, DisplayItem, HealthSample};
use tracing::warn;

use crate::decoder::{DecodedResource, DecodingError, FhirDecoder};
use crate::subtitle::Subtitle;

/// Row for a clinical record given the outcome of decoding its resource.
///
/// Decoded records can be opened to show their source; failures keep the
/// record's name and show the error in place of the subtitle.
pub fn build_item(
    record: &ClinicalRecord,
    outcome: &Result<DecodedResource, DecodingError>,
) -> DisplayItem {
    match outcome {
        Ok(resource) => DisplayItem::new(
            record.display_name.clone(),
            Some(resource.subtitle()),
            Accessory::Disclosure,
        ),
        Err(err) => DisplayItem::new(
            record.display_name.clone(),
            Some(err.to_string()),
            Accessory::None,
        ),
    }
}

/// Row for a sample shown in a clinical category. Nothing escapes this
/// function: samples that are not clinical records, or carry no resource,
/// become the error placeholder.
pub fn clinical_item(sample: Option<&HealthSample>, decoder: &FhirDecoder) -> DisplayItem {
    let Some(sample) = sample else {
        return DisplayItem::error_item();
    };

    let outcome = decoder.decode_sample(sample);
    match (sample.clinical_record(), &outcome) {
        (_, Err(err @ (DecodingError::NotClinicalRecord | DecodingError::NoResourcePresent))) => {
            warn!(sample_type = %sample.sample_type, error = %err, "failed to summarize sample");
            DisplayItem::error_item()
        }
        (Some(record), _) => build_item(record, &outcome),
        (None, _) => DisplayItem::error_item(),
    }
}
