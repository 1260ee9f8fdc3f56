//! FHIR R4 (4.0.1) resource models.

use serde::Deserialize;

use crate::datatypes::{
    fhir_code, CodeableConcept, Medication, Period, Primitive, Quantity, Reference,
};
use crate::ResourceKind;

fhir_code! {
    pub enum AllergyIntoleranceCategory {
        Food => "food",
        Medication => "medication",
        Environment => "environment",
        Biologic => "biologic",
    }
}

fhir_code! {
    pub enum AllergyIntoleranceType {
        Allergy => "allergy",
        Intolerance => "intolerance",
    }
}

fhir_code! {
    pub enum AllergyIntoleranceCriticality {
        Low => "low",
        High => "high",
        UnableToAssess => "unable-to-assess",
    }
}

fhir_code! {
    pub enum ImmunizationStatus {
        Completed => "completed",
        EnteredInError => "entered-in-error",
        NotDone => "not-done",
    }
}

fhir_code! {
    pub enum MedicationDispenseStatus {
        Preparation => "preparation",
        InProgress => "in-progress",
        Cancelled => "cancelled",
        OnHold => "on-hold",
        Completed => "completed",
        EnteredInError => "entered-in-error",
        Stopped => "stopped",
        Declined => "declined",
        Unknown => "unknown",
    }
}

fhir_code! {
    pub enum MedicationRequestStatus {
        Active => "active",
        OnHold => "on-hold",
        Cancelled => "cancelled",
        Completed => "completed",
        EnteredInError => "entered-in-error",
        Stopped => "stopped",
        Draft => "draft",
        Unknown => "unknown",
    }
}

fhir_code! {
    pub enum MedicationRequestIntent {
        Proposal => "proposal",
        Plan => "plan",
        Order => "order",
        OriginalOrder => "original-order",
        ReflexOrder => "reflex-order",
        FillerOrder => "filler-order",
        InstanceOrder => "instance-order",
        Option => "option",
    }
}

fhir_code! {
    pub enum MedicationStatementStatus {
        Active => "active",
        Completed => "completed",
        EnteredInError => "entered-in-error",
        Intended => "intended",
        Stopped => "stopped",
        OnHold => "on-hold",
        Unknown => "unknown",
        NotTaken => "not-taken",
    }
}

fhir_code! {
    pub enum ObservationStatus {
        Registered => "registered",
        Preliminary => "preliminary",
        Final => "final",
        Amended => "amended",
        Corrected => "corrected",
        Cancelled => "cancelled",
        EnteredInError => "entered-in-error",
        Unknown => "unknown",
    }
}

fhir_code! {
    pub enum ProcedureStatus {
        Preparation => "preparation",
        InProgress => "in-progress",
        NotDone => "not-done",
        OnHold => "on-hold",
        Stopped => "stopped",
        Completed => "completed",
        EnteredInError => "entered-in-error",
        Unknown => "unknown",
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AllergyReaction {
    pub substance: Option<CodeableConcept>,
    pub manifestation: Vec<CodeableConcept>,
    pub severity: Option<Primitive<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllergyIntolerance {
    pub id: Option<Primitive<String>>,
    pub clinical_status: Option<CodeableConcept>,
    pub verification_status: Option<CodeableConcept>,
    #[serde(rename = "type")]
    pub allergy_type: Option<Primitive<AllergyIntoleranceType>>,
    #[serde(default)]
    pub category: Vec<Primitive<AllergyIntoleranceCategory>>,
    pub criticality: Option<Primitive<AllergyIntoleranceCriticality>>,
    pub code: Option<CodeableConcept>,
    pub patient: Reference,
    pub onset_date_time: Option<Primitive<String>>,
    pub recorded_date: Option<Primitive<String>>,
    #[serde(default)]
    pub reaction: Vec<AllergyReaction>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub id: Option<Primitive<String>>,
    pub clinical_status: Option<CodeableConcept>,
    pub verification_status: Option<CodeableConcept>,
    #[serde(default)]
    pub category: Vec<CodeableConcept>,
    pub severity: Option<CodeableConcept>,
    pub code: Option<CodeableConcept>,
    pub subject: Reference,
    pub encounter: Option<Reference>,
    pub onset_date_time: Option<Primitive<String>>,
    pub abatement_date_time: Option<Primitive<String>>,
    pub recorded_date: Option<Primitive<String>>,
}

/// `occurrence[x]`, required on an R4 Immunization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub enum Occurrence {
    #[serde(rename = "occurrenceDateTime")]
    DateTime(Primitive<String>),
    #[serde(rename = "occurrenceString")]
    String(Primitive<String>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Immunization {
    pub id: Option<Primitive<String>>,
    pub status: Primitive<ImmunizationStatus>,
    pub status_reason: Option<CodeableConcept>,
    pub vaccine_code: CodeableConcept,
    pub patient: Reference,
    pub primary_source: Option<Primitive<bool>>,
    pub lot_number: Option<Primitive<String>>,
    pub route: Option<CodeableConcept>,
    #[serde(flatten)]
    pub occurrence: Occurrence,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Dosage {
    pub text: Option<Primitive<String>>,
    pub route: Option<CodeableConcept>,
    pub method: Option<CodeableConcept>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationDispense {
    pub id: Option<Primitive<String>>,
    pub status: Primitive<MedicationDispenseStatus>,
    pub subject: Option<Reference>,
    pub quantity: Option<Quantity>,
    pub when_handed_over: Option<Primitive<String>>,
    #[serde(default)]
    pub dosage_instruction: Vec<Dosage>,
    #[serde(flatten)]
    pub medication: Medication,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationRequest {
    pub id: Option<Primitive<String>>,
    pub status: Primitive<MedicationRequestStatus>,
    pub intent: Primitive<MedicationRequestIntent>,
    pub subject: Reference,
    pub authored_on: Option<Primitive<String>>,
    pub requester: Option<Reference>,
    #[serde(default)]
    pub reason_code: Vec<CodeableConcept>,
    #[serde(default)]
    pub dosage_instruction: Vec<Dosage>,
    #[serde(flatten)]
    pub medication: Medication,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationStatement {
    pub id: Option<Primitive<String>>,
    pub status: Primitive<MedicationStatementStatus>,
    pub subject: Reference,
    pub effective_date_time: Option<Primitive<String>>,
    pub effective_period: Option<Period>,
    pub date_asserted: Option<Primitive<String>>,
    #[serde(default)]
    pub dosage: Vec<Dosage>,
    #[serde(flatten)]
    pub medication: Medication,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationComponent {
    pub code: CodeableConcept,
    pub value_quantity: Option<Quantity>,
    pub value_string: Option<Primitive<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub id: Option<Primitive<String>>,
    pub status: Primitive<ObservationStatus>,
    #[serde(default)]
    pub category: Vec<CodeableConcept>,
    pub code: CodeableConcept,
    pub subject: Option<Reference>,
    pub effective_date_time: Option<Primitive<String>>,
    pub issued: Option<Primitive<String>>,
    pub value_quantity: Option<Quantity>,
    pub value_string: Option<Primitive<String>>,
    pub value_codeable_concept: Option<CodeableConcept>,
    #[serde(default)]
    pub interpretation: Vec<CodeableConcept>,
    #[serde(default)]
    pub component: Vec<ObservationComponent>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Procedure {
    pub id: Option<Primitive<String>>,
    pub status: Primitive<ProcedureStatus>,
    pub category: Option<CodeableConcept>,
    pub code: Option<CodeableConcept>,
    pub subject: Reference,
    pub performed_date_time: Option<Primitive<String>>,
    pub performed_period: Option<Period>,
}

/// An R4 resource decoded with its full schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    AllergyIntolerance(AllergyIntolerance),
    Condition(Condition),
    Immunization(Immunization),
    MedicationDispense(MedicationDispense),
    MedicationRequest(MedicationRequest),
    MedicationStatement(MedicationStatement),
    Observation(Observation),
    Procedure(Procedure),
}

pub(crate) fn decode(kind: ResourceKind, data: &[u8]) -> serde_json::Result<Resource> {
    Ok(match kind {
        ResourceKind::AllergyIntolerance => Resource::AllergyIntolerance(serde_json::from_slice(data)?),
        ResourceKind::Condition => Resource::Condition(serde_json::from_slice(data)?),
        ResourceKind::Immunization => Resource::Immunization(serde_json::from_slice(data)?),
        ResourceKind::MedicationDispense => Resource::MedicationDispense(serde_json::from_slice(data)?),
        ResourceKind::MedicationOrder => Resource::MedicationRequest(serde_json::from_slice(data)?),
        ResourceKind::MedicationStatement => {
            Resource::MedicationStatement(serde_json::from_slice(data)?)
        }
        ResourceKind::Observation => Resource::Observation(serde_json::from_slice(data)?),
        ResourceKind::Procedure => Resource::Procedure(serde_json::from_slice(data)?),
    })
}
