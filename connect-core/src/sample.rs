use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const CLINICAL_PREFIX: &str = "HKClinicalTypeIdentifier";
const QUANTITY_PREFIX: &str = "HKQuantityTypeIdentifier";

/// Clinical record categories exposed by the health store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClinicalType {
    AllergyRecord,
    ConditionRecord,
    ImmunizationRecord,
    LabResultRecord,
    MedicationRecord,
    ProcedureRecord,
    VitalSignRecord,
    /// Any other clinical identifier, kept verbatim.
    Other(String),
}

impl ClinicalType {
    pub fn identifier(&self) -> String {
        let suffix = match self {
            Self::AllergyRecord => "AllergyRecord",
            Self::ConditionRecord => "ConditionRecord",
            Self::ImmunizationRecord => "ImmunizationRecord",
            Self::LabResultRecord => "LabResultRecord",
            Self::MedicationRecord => "MedicationRecord",
            Self::ProcedureRecord => "ProcedureRecord",
            Self::VitalSignRecord => "VitalSignRecord",
            Self::Other(identifier) => return identifier.clone(),
        };
        format!("{CLINICAL_PREFIX}{suffix}")
    }

    fn from_identifier(identifier: &str) -> Self {
        match identifier.strip_prefix(CLINICAL_PREFIX) {
            Some("AllergyRecord") => Self::AllergyRecord,
            Some("ConditionRecord") => Self::ConditionRecord,
            Some("ImmunizationRecord") => Self::ImmunizationRecord,
            Some("LabResultRecord") => Self::LabResultRecord,
            Some("MedicationRecord") => Self::MedicationRecord,
            Some("ProcedureRecord") => Self::ProcedureRecord,
            Some("VitalSignRecord") => Self::VitalSignRecord,
            _ => Self::Other(identifier.to_string()),
        }
    }
}

/// Quantitative (fitness) sample categories.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QuantityType {
    StepCount,
    DistanceWalkingRunning,
    Other(String),
}

impl QuantityType {
    pub fn identifier(&self) -> String {
        match self {
            Self::StepCount => format!("{QUANTITY_PREFIX}StepCount"),
            Self::DistanceWalkingRunning => format!("{QUANTITY_PREFIX}DistanceWalkingRunning"),
            Self::Other(identifier) => identifier.clone(),
        }
    }

    fn from_identifier(identifier: &str) -> Self {
        match identifier.strip_prefix(QUANTITY_PREFIX) {
            Some("StepCount") => Self::StepCount,
            Some("DistanceWalkingRunning") => Self::DistanceWalkingRunning,
            _ => Self::Other(identifier.to_string()),
        }
    }
}

/// Type tag of a sample, serialized as the health store identifier string
/// (for example `HKClinicalTypeIdentifierAllergyRecord`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SampleType {
    Clinical(ClinicalType),
    Quantity(QuantityType),
    /// Identifier of a sample family this crate does not model.
    Other(String),
}

impl SampleType {
    pub fn identifier(&self) -> String {
        match self {
            Self::Clinical(clinical) => clinical.identifier(),
            Self::Quantity(quantity) => quantity.identifier(),
            Self::Other(identifier) => identifier.clone(),
        }
    }

    pub fn is_clinical(&self) -> bool {
        matches!(self, Self::Clinical(_))
    }
}

impl From<String> for SampleType {
    fn from(identifier: String) -> Self {
        if identifier.starts_with(CLINICAL_PREFIX) {
            Self::Clinical(ClinicalType::from_identifier(&identifier))
        } else if identifier.starts_with(QUANTITY_PREFIX) {
            Self::Quantity(QuantityType::from_identifier(&identifier))
        } else {
            Self::Other(identifier)
        }
    }
}

impl From<SampleType> for String {
    fn from(sample_type: SampleType) -> Self {
        sample_type.identifier()
    }
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier())
    }
}

/// Resource type tag declared by the health store for an embedded payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceType {
    AllergyIntolerance,
    Condition,
    Coverage,
    DiagnosticReport,
    DocumentReference,
    ExplanationOfBenefit,
    Immunization,
    MedicationDispense,
    MedicationOrder,
    MedicationRequest,
    MedicationStatement,
    Observation,
    Patient,
    Procedure,
    Other(String),
}

impl ResourceType {
    /// Tag as written by the health store (`allergyIntolerance`, ...).
    pub fn as_str(&self) -> &str {
        match self {
            Self::AllergyIntolerance => "allergyIntolerance",
            Self::Condition => "condition",
            Self::Coverage => "coverage",
            Self::DiagnosticReport => "diagnosticReport",
            Self::DocumentReference => "documentReference",
            Self::ExplanationOfBenefit => "explanationOfBenefit",
            Self::Immunization => "immunization",
            Self::MedicationDispense => "medicationDispense",
            Self::MedicationOrder => "medicationOrder",
            Self::MedicationRequest => "medicationRequest",
            Self::MedicationStatement => "medicationStatement",
            Self::Observation => "observation",
            Self::Patient => "patient",
            Self::Procedure => "procedure",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for ResourceType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "allergyIntolerance" => Self::AllergyIntolerance,
            "condition" => Self::Condition,
            "coverage" => Self::Coverage,
            "diagnosticReport" => Self::DiagnosticReport,
            "documentReference" => Self::DocumentReference,
            "explanationOfBenefit" => Self::ExplanationOfBenefit,
            "immunization" => Self::Immunization,
            "medicationDispense" => Self::MedicationDispense,
            "medicationOrder" => Self::MedicationOrder,
            "medicationRequest" => Self::MedicationRequest,
            "medicationStatement" => Self::MedicationStatement,
            "observation" => Self::Observation,
            "patient" => Self::Patient,
            "procedure" => Self::Procedure,
            _ => Self::Other(tag),
        }
    }
}

impl From<ResourceType> for String {
    fn from(resource_type: ResourceType) -> Self {
        resource_type.as_str().to_string()
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// FHIR release a payload is encoded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FhirRelease {
    Dstu2,
    R4,
}

impl fmt::Display for FhirRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dstu2 => f.write_str("DSTU2"),
            Self::R4 => f.write_str("R4"),
        }
    }
}

/// FHIR version declared for a payload.
///
/// Accepts the release names (`dstu2`, `r4`) as well as the semantic versions
/// the health store reports (`1.0.2`, `4.0.1`). The declared text is kept so
/// an export writes back exactly what it read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct FhirVersion {
    declared: String,
    release: Option<FhirRelease>,
}

impl FhirVersion {
    pub fn dstu2() -> Self {
        Self::from("dstu2".to_string())
    }

    pub fn r4() -> Self {
        Self::from("r4".to_string())
    }

    /// Release the declared version belongs to, if it is one this crate knows.
    pub fn release(&self) -> Option<FhirRelease> {
        self.release
    }

    pub fn as_str(&self) -> &str {
        &self.declared
    }
}

impl From<String> for FhirVersion {
    fn from(declared: String) -> Self {
        let normalized = declared.trim().to_ascii_lowercase();
        let release = if normalized == "dstu2" || normalized == "1.0" || normalized.starts_with("1.0.")
        {
            Some(FhirRelease::Dstu2)
        } else if normalized == "r4" || normalized == "4.0" || normalized.starts_with("4.0.") {
            Some(FhirRelease::R4)
        } else {
            None
        };
        Self { declared, release }
    }
}

impl From<FhirVersion> for String {
    fn from(version: FhirVersion) -> Self {
        version.declared
    }
}

impl fmt::Display for FhirVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// FHIR resource embedded in a clinical record.
///
/// `data` holds the raw JSON bytes. In an export file it may be written either
/// as a JSON value or as a string containing the JSON text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FhirResourcePayload {
    pub resource_type: ResourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fhir_version: Option<FhirVersion>,
    #[serde(with = "raw_json")]
    pub data: Vec<u8>,
}

impl FhirResourcePayload {
    pub fn new(
        resource_type: ResourceType,
        fhir_version: Option<FhirVersion>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            resource_type,
            fhir_version,
            data: data.into(),
        }
    }
}

mod raw_json {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Value;

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        match serde_json::from_slice::<Value>(data) {
            Ok(value) => value.serialize(serializer),
            Err(_) => String::from_utf8_lossy(data).serialize(serializer),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(text) => Ok(text.into_bytes()),
            other => serde_json::to_vec(&other).map_err(serde::de::Error::custom),
        }
    }
}

/// Clinical record: a display name plus the optional FHIR payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalRecord {
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fhir_resource: Option<FhirResourcePayload>,
}

/// Units a quantity sample can be expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuantityUnit {
    #[serde(rename = "m")]
    Meter,
    #[serde(rename = "km")]
    Kilometer,
    #[serde(rename = "mi")]
    Mile,
    #[serde(rename = "ft")]
    Foot,
    #[serde(rename = "count")]
    Count,
}

impl QuantityUnit {
    fn meters_per_unit(self) -> Option<f64> {
        match self {
            Self::Meter => Some(1.0),
            Self::Kilometer => Some(1_000.0),
            Self::Mile => Some(1_609.344),
            Self::Foot => Some(0.3048),
            Self::Count => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: QuantityUnit,
}

impl Quantity {
    pub fn new(value: f64, unit: QuantityUnit) -> Self {
        Self { value, unit }
    }

    /// Value expressed in `unit`, or `None` when the units are incompatible.
    pub fn value_in(&self, unit: QuantityUnit) -> Option<f64> {
        if self.unit == unit {
            return Some(self.value);
        }
        let from = self.unit.meters_per_unit()?;
        let to = unit.meters_per_unit()?;
        Some(self.value * from / to)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantitySample {
    pub quantity: Quantity,
}

/// Concrete sample payload, decided once when the sample is ingested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SampleKind {
    Clinical(ClinicalRecord),
    Quantity(QuantitySample),
}

/// A sample as returned by the health store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSample {
    pub sample_type: SampleType,
    pub start_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub kind: SampleKind,
}

impl HealthSample {
    pub fn clinical_record(&self) -> Option<&ClinicalRecord> {
        match &self.kind {
            SampleKind::Clinical(record) => Some(record),
            SampleKind::Quantity(_) => None,
        }
    }

    pub fn quantity(&self) -> Option<&Quantity> {
        match &self.kind {
            SampleKind::Quantity(sample) => Some(&sample.quantity),
            SampleKind::Clinical(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_type_identifiers_round_trip() {
        let allergy = SampleType::from("HKClinicalTypeIdentifierAllergyRecord".to_string());
        assert_eq!(allergy, SampleType::Clinical(ClinicalType::AllergyRecord));
        assert_eq!(
            allergy.identifier(),
            "HKClinicalTypeIdentifierAllergyRecord"
        );

        let steps = SampleType::from("HKQuantityTypeIdentifierStepCount".to_string());
        assert_eq!(steps, SampleType::Quantity(QuantityType::StepCount));

        let sleep = SampleType::from("HKCategoryTypeIdentifierSleepAnalysis".to_string());
        assert_eq!(
            sleep,
            SampleType::Other("HKCategoryTypeIdentifierSleepAnalysis".to_string())
        );
    }

    #[test]
    fn fhir_version_accepts_release_names_and_semver() {
        let release = |declared: &str| FhirVersion::from(declared.to_string()).release();
        assert_eq!(release("dstu2"), Some(FhirRelease::Dstu2));
        assert_eq!(release("1.0.2"), Some(FhirRelease::Dstu2));
        assert_eq!(release("R4"), Some(FhirRelease::R4));
        assert_eq!(release("4.0.1"), Some(FhirRelease::R4));
        assert_eq!(release("3.0.1"), None);
    }

    #[test]
    fn fhir_version_writes_back_declared_text() {
        let payload: FhirResourcePayload = serde_json::from_str(
            r#"{"resourceType":"observation","fhirVersion":"1.0.2","data":{}}"#,
        )
        .expect("payload with semantic version");
        assert_eq!(
            payload.fhir_version.as_ref().and_then(FhirVersion::release),
            Some(FhirRelease::Dstu2)
        );

        let written = serde_json::to_value(&payload).expect("payload serializes");
        assert_eq!(written["fhirVersion"], "1.0.2");
    }

    #[test]
    fn payload_data_accepts_value_or_text() {
        let embedded: FhirResourcePayload = serde_json::from_str(
            r#"{"resourceType":"condition","fhirVersion":"dstu2","data":{"b":1,"a":2}}"#,
        )
        .expect("payload with embedded JSON");
        assert_eq!(embedded.data, br#"{"b":1,"a":2}"#.to_vec());

        let text: FhirResourcePayload =
            serde_json::from_str(r#"{"resourceType":"procedure","data":"{\"status\":\"completed\"}"}"#)
                .expect("payload with JSON text");
        assert_eq!(text.fhir_version, None);
        assert_eq!(text.data, br#"{"status":"completed"}"#.to_vec());
    }

    #[test]
    fn quantity_converts_lengths_only() {
        let distance = Quantity::new(1.5, QuantityUnit::Kilometer);
        assert_eq!(distance.value_in(QuantityUnit::Meter), Some(1500.0));
        assert_eq!(distance.value_in(QuantityUnit::Count), None);

        let steps = Quantity::new(1532.0, QuantityUnit::Count);
        assert_eq!(steps.value_in(QuantityUnit::Count), Some(1532.0));
    }

    #[test]
    fn clinical_sample_reads_from_export_json() {
        let sample: HealthSample = serde_json::from_str(
            r#"{
                "sampleType": "HKClinicalTypeIdentifierConditionRecord",
                "startDate": "2020-03-01T10:00:00Z",
                "kind": "clinical",
                "displayName": "Asthma",
                "fhirResource": {"resourceType": "condition", "fhirVersion": "r4", "data": {}}
            }"#,
        )
        .expect("clinical sample");

        let record = sample.clinical_record().expect("clinical record");
        assert_eq!(record.display_name, "Asthma");
        assert!(sample.quantity().is_none());
    }
}
