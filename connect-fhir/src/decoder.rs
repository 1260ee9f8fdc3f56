use connect_core::{
    ConnectConfig, FhirRelease, FhirResourcePayload, FhirVersion, HealthSample, ResourceType,
};
use tracing::{debug, warn};

use crate::{dstu2, partial, r4};

/// Why a clinical sample could not be turned into a resource.
#[derive(Debug, thiserror::Error)]
pub enum DecodingError {
    #[error("The sample is not a clinical record")]
    NotClinicalRecord,
    #[error("The clinical record has no FHIR resource")]
    NoResourcePresent,
    #[error("Resource type {0} is not supported")]
    UnsupportedResourceType(ResourceType),
    #[error("FHIR version {0} is not supported")]
    UnsupportedVersion(String),
    #[error("The FHIR resource is not valid JSON: {partial}")]
    MalformedJson { full: String, partial: String },
    #[error("The {resource_type} resource could not be read: {partial} (full schema: {full})")]
    SchemaMismatch {
        resource_type: ResourceType,
        full: String,
        partial: String,
    },
}

/// Resource families the pipeline can summarize. `MedicationOrder` stands for
/// DSTU2 MedicationOrder and R4 MedicationRequest alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    AllergyIntolerance,
    Condition,
    Immunization,
    MedicationDispense,
    MedicationOrder,
    MedicationStatement,
    Observation,
    Procedure,
}

impl ResourceKind {
    /// Family of a declared resource tag, whatever release it came from.
    /// This is the dispatch table of the partial schemas.
    pub fn of(resource_type: &ResourceType) -> Option<Self> {
        let kind = match resource_type {
            ResourceType::AllergyIntolerance => Self::AllergyIntolerance,
            ResourceType::Condition => Self::Condition,
            ResourceType::Immunization => Self::Immunization,
            ResourceType::MedicationDispense => Self::MedicationDispense,
            ResourceType::MedicationOrder | ResourceType::MedicationRequest => Self::MedicationOrder,
            ResourceType::MedicationStatement => Self::MedicationStatement,
            ResourceType::Observation => Self::Observation,
            ResourceType::Procedure => Self::Procedure,
            _ => return None,
        };
        Some(kind)
    }

    /// Dispatch table of the full schemas: like [`ResourceKind::of`], except
    /// that `medicationOrder` exists only in DSTU2 and `medicationRequest`
    /// only in R4.
    pub fn for_release(release: FhirRelease, resource_type: &ResourceType) -> Option<Self> {
        match (release, resource_type) {
            (FhirRelease::R4, ResourceType::MedicationOrder)
            | (FhirRelease::Dstu2, ResourceType::MedicationRequest) => None,
            _ => Self::of(resource_type),
        }
    }
}

/// Result of a successful decode. Exactly one schema backs it.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedResource {
    Dstu2(dstu2::Resource),
    R4(r4::Resource),
    Partial(partial::Resource),
}

impl DecodedResource {
    /// Release of the full schema used, or `None` for the fallback schema.
    pub fn release(&self) -> Option<FhirRelease> {
        match self {
            Self::Dstu2(_) => Some(FhirRelease::Dstu2),
            Self::R4(_) => Some(FhirRelease::R4),
            Self::Partial(_) => None,
        }
    }

    pub fn is_partial(&self) -> bool {
        matches!(self, Self::Partial(_))
    }
}

/// Two-tier decoder: the full schema of the payload's release first, then the
/// partial schema exactly once.
#[derive(Debug, Clone, Copy)]
pub struct FhirDecoder {
    r4_supported: bool,
}

impl Default for FhirDecoder {
    fn default() -> Self {
        Self { r4_supported: true }
    }
}

impl FhirDecoder {
    pub fn new(r4_supported: bool) -> Self {
        Self { r4_supported }
    }

    pub fn from_config(config: &ConnectConfig) -> Self {
        Self::new(config.r4_supported)
    }

    /// Decode the resource embedded in a clinical sample.
    pub fn decode_sample(&self, sample: &HealthSample) -> Result<DecodedResource, DecodingError> {
        let record = sample
            .clinical_record()
            .ok_or(DecodingError::NotClinicalRecord)?;
        let payload = record
            .fhir_resource
            .as_ref()
            .ok_or(DecodingError::NoResourcePresent)?;
        self.decode(payload)
    }

    /// Decode with the full schema of the payload's release, then retry once
    /// with the partial schema of its resource family.
    ///
    /// An unsupported version or a tag from the other release leaves no full
    /// schema to try, but the partial schema still gets its chance. When that
    /// fails too, the version or type error is reported.
    pub fn decode(&self, payload: &FhirResourcePayload) -> Result<DecodedResource, DecodingError> {
        let kind = ResourceKind::of(&payload.resource_type)
            .ok_or_else(|| DecodingError::UnsupportedResourceType(payload.resource_type.clone()))?;

        let full_error = match self.decode_full(payload) {
            Ok(resource) => return Ok(resource),
            Err(err) => err,
        };

        match full_error {
            FullTierError::Unsupported(unsupported) => {
                warn!(
                    resource_type = %payload.resource_type,
                    error = %unsupported,
                    "no full schema for payload, retrying with partial schema"
                );
                partial::decode(kind, &payload.data)
                    .map(DecodedResource::Partial)
                    .map_err(|partial_error| {
                        debug!(error = %partial_error, "partial schema decode failed");
                        unsupported
                    })
            }
            FullTierError::Schema { release, error } => {
                warn!(
                    resource_type = %payload.resource_type,
                    %release,
                    %error,
                    "full schema decode failed, retrying with partial schema"
                );
                partial::decode(kind, &payload.data)
                    .map(DecodedResource::Partial)
                    .map_err(|partial_error| {
                        if partial_error.is_syntax() || partial_error.is_eof() {
                            DecodingError::MalformedJson {
                                full: error.to_string(),
                                partial: partial_error.to_string(),
                            }
                        } else {
                            DecodingError::SchemaMismatch {
                                resource_type: payload.resource_type.clone(),
                                full: error.to_string(),
                                partial: partial_error.to_string(),
                            }
                        }
                    })
            }
        }
    }

    fn decode_full(&self, payload: &FhirResourcePayload) -> Result<DecodedResource, FullTierError> {
        let release = self
            .release_for(payload.fhir_version.as_ref())
            .map_err(FullTierError::Unsupported)?;
        let kind = ResourceKind::for_release(release, &payload.resource_type).ok_or_else(|| {
            FullTierError::Unsupported(DecodingError::UnsupportedResourceType(
                payload.resource_type.clone(),
            ))
        })?;

        let decoded = match release {
            FhirRelease::Dstu2 => dstu2::decode(kind, &payload.data).map(DecodedResource::Dstu2),
            FhirRelease::R4 => r4::decode(kind, &payload.data).map(DecodedResource::R4),
        };
        decoded.map_err(|error| FullTierError::Schema { release, error })
    }

    /// Schema set to use for a declared FHIR version.
    pub fn release_for(&self, version: Option<&FhirVersion>) -> Result<FhirRelease, DecodingError> {
        let release = match version.and_then(FhirVersion::release) {
            Some(release) => release,
            None if !self.r4_supported => FhirRelease::Dstu2,
            None => {
                let declared = version.map_or("unspecified", FhirVersion::as_str);
                return Err(DecodingError::UnsupportedVersion(declared.to_string()));
            }
        };
        debug!(?version, %release, "resolved FHIR release");
        Ok(release)
    }
}

/// Why the full tier produced nothing.
enum FullTierError {
    /// No full schema applies to the payload.
    Unsupported(DecodingError),
    Schema {
        release: FhirRelease,
        error: serde_json::Error,
    },
}
