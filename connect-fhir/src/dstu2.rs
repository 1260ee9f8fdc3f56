//! FHIR DSTU2 (1.0.2) resource models.
//!
//! Required fields follow the DSTU2 cardinalities; a payload missing any of
//! them fails to decode here and is retried against the partial schema.

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
        Other => "other",
    }
}

fhir_code! {
    pub enum AllergyIntoleranceStatus {
        Active => "active",
        Unconfirmed => "unconfirmed",
        Confirmed => "confirmed",
        Inactive => "inactive",
        Resolved => "resolved",
        Refuted => "refuted",
        EnteredInError => "entered-in-error",
    }
}

fhir_code! {
    pub enum AllergyIntoleranceCriticality {
        Low => "CRITL",
        High => "CRITH",
        UnableToAssess => "CRITU",
    }
}

fhir_code! {
    pub enum ConditionVerificationStatus {
        Provisional => "provisional",
        Differential => "differential",
        Confirmed => "confirmed",
        Refuted => "refuted",
        EnteredInError => "entered-in-error",
        Unknown => "unknown",
    }
}

fhir_code! {
    /// Shared by Immunization and MedicationDispense in DSTU2.
    pub enum MedicationAdministrationStatus {
        InProgress => "in-progress",
        OnHold => "on-hold",
        Completed => "completed",
        EnteredInError => "entered-in-error",
        Stopped => "stopped",
    }
}

fhir_code! {
    pub enum MedicationOrderStatus {
        Active => "active",
        OnHold => "on-hold",
        Completed => "completed",
        EnteredInError => "entered-in-error",
        Stopped => "stopped",
        Draft => "draft",
    }
}

fhir_code! {
    pub enum MedicationStatementStatus {
        Active => "active",
        Completed => "completed",
        EnteredInError => "entered-in-error",
        Intended => "intended",
    }
}

fhir_code! {
    pub enum ObservationStatus {
        Registered => "registered",
        Preliminary => "preliminary",
        Final => "final",
        Amended => "amended",
        Cancelled => "cancelled",
        EnteredInError => "entered-in-error",
        Unknown => "unknown",
    }
}

fhir_code! {
    pub enum ProcedureStatus {
        InProgress => "in-progress",
        Aborted => "aborted",
        Completed => "completed",
        EnteredInError => "entered-in-error",
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
    pub onset: Option<Primitive<String>>,
    pub recorded_date: Option<Primitive<String>>,
    pub patient: Reference,
    pub substance: CodeableConcept,
    pub status: Option<Primitive<AllergyIntoleranceStatus>>,
    pub criticality: Option<Primitive<AllergyIntoleranceCriticality>>,
    pub category: Option<Primitive<AllergyIntoleranceCategory>>,
    #[serde(default)]
    pub reaction: Vec<AllergyReaction>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub id: Option<Primitive<String>>,
    pub patient: Reference,
    pub encounter: Option<Reference>,
    pub asserter: Option<Reference>,
    pub date_recorded: Option<Primitive<String>>,
    pub code: CodeableConcept,
    pub category: Option<CodeableConcept>,
    /// Free code in DSTU2 (`active`, `relapse`, `remission`, `resolved`).
    pub clinical_status: Option<Primitive<String>>,
    pub verification_status: Primitive<ConditionVerificationStatus>,
    pub severity: Option<CodeableConcept>,
    pub onset_date_time: Option<Primitive<String>>,
    pub abatement_date_time: Option<Primitive<String>>,
    pub notes: Option<Primitive<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Immunization {
    pub id: Option<Primitive<String>>,
    pub status: Primitive<MedicationAdministrationStatus>,
    pub date: Option<Primitive<String>>,
    pub vaccine_code: CodeableConcept,
    pub patient: Reference,
    pub was_not_given: Primitive<bool>,
    pub reported: Primitive<bool>,
    pub performer: Option<Reference>,
    pub lot_number: Option<Primitive<String>>,
    pub route: Option<CodeableConcept>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DosageInstruction {
    pub text: Option<Primitive<String>>,
    pub route: Option<CodeableConcept>,
    pub method: Option<CodeableConcept>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationDispense {
    pub id: Option<Primitive<String>>,
    pub status: Option<Primitive<MedicationAdministrationStatus>>,
    pub patient: Option<Reference>,
    pub quantity: Option<Quantity>,
    pub when_handed_over: Option<Primitive<String>>,
    #[serde(default)]
    pub dosage_instruction: Vec<DosageInstruction>,
    #[serde(flatten)]
    pub medication: Medication,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationOrder {
    pub id: Option<Primitive<String>>,
    pub date_written: Option<Primitive<String>>,
    pub status: Option<Primitive<MedicationOrderStatus>>,
    pub patient: Option<Reference>,
    pub prescriber: Option<Reference>,
    pub reason_codeable_concept: Option<CodeableConcept>,
    #[serde(default)]
    pub dosage_instruction: Vec<DosageInstruction>,
    #[serde(flatten)]
    pub medication: Medication,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationStatement {
    pub id: Option<Primitive<String>>,
    pub patient: Reference,
    pub status: Primitive<MedicationStatementStatus>,
    pub was_not_taken: Option<Primitive<bool>>,
    pub date_asserted: Option<Primitive<String>>,
    pub effective_date_time: Option<Primitive<String>>,
    pub effective_period: Option<Period>,
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
    pub category: Option<CodeableConcept>,
    pub code: CodeableConcept,
    pub subject: Option<Reference>,
    pub effective_date_time: Option<Primitive<String>>,
    pub issued: Option<Primitive<String>>,
    pub value_quantity: Option<Quantity>,
    pub value_string: Option<Primitive<String>>,
    pub value_codeable_concept: Option<CodeableConcept>,
    pub interpretation: Option<CodeableConcept>,
    #[serde(default)]
    pub component: Vec<ObservationComponent>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Procedure {
    pub id: Option<Primitive<String>>,
    pub subject: Reference,
    pub status: Primitive<ProcedureStatus>,
    pub category: Option<CodeableConcept>,
    pub code: CodeableConcept,
    pub not_performed: Option<Primitive<bool>>,
    pub performed_date_time: Option<Primitive<String>>,
    pub performed_period: Option<Period>,
}

/// A DSTU2 resource decoded with its full schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    AllergyIntolerance(AllergyIntolerance),
    Condition(Condition),
    Immunization(Immunization),
    MedicationDispense(MedicationDispense),
    MedicationOrder(MedicationOrder),
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
        ResourceKind::MedicationOrder => Resource::MedicationOrder(serde_json::from_slice(data)?),
        ResourceKind::MedicationStatement => {
            Resource::MedicationStatement(serde_json::from_slice(data)?)
        }
        ResourceKind::Observation => Resource::Observation(serde_json::from_slice(data)?),
        ResourceKind::Procedure => Resource::Procedure(serde_json::from_slice(data)?),
    })
}
