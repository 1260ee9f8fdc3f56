//! Release-agnostic fallback schemas.
//!
//! Each struct keeps only what the category list shows plus the concept that
//! identifies the record. Everything else a producer may have got wrong is
//! ignored.

use serde::Deserialize;

use crate::datatypes::Primitive;
use crate::ResourceKind;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Coding {
    pub code: String,
    pub display: Option<String>,
    pub system: String,
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CodeableConcept {
    pub coding: Vec<Coding>,
    pub text: Option<String>,
}

/// A field that DSTU2 writes once and R4 writes as a list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn first(&self) -> Option<&T> {
        match self {
            Self::One(value) => Some(value),
            Self::Many(values) => values.first(),
        }
    }
}

/// A status written as a bare code (DSTU2) or as a concept (R4).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CodeOrConcept {
    Code(Primitive<String>),
    Concept(CodeableConcept),
}

impl CodeOrConcept {
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Code(code) => code.as_deref(),
            Self::Concept(concept) => concept.coding.first().map(|coding| coding.code.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AllergyIntolerancePartial {
    pub category: Option<OneOrMany<Primitive<String>>>,
    /// `substance` in DSTU2, `code` in R4.
    #[serde(alias = "code")]
    pub substance: CodeableConcept,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionPartial {
    pub category: OneOrMany<CodeableConcept>,
    pub code: CodeableConcept,
    pub clinical_status: Option<CodeOrConcept>,
    pub verification_status: Option<CodeOrConcept>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImmunizationPartial {
    pub status: Primitive<String>,
    pub vaccine_code: Option<CodeableConcept>,
    pub reported: Option<Primitive<bool>>,
    pub was_not_given: Option<Primitive<bool>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DosageInstruction {
    pub method: Option<CodeableConcept>,
    pub route: Option<CodeableConcept>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationDispensePartial {
    #[serde(default)]
    pub dosage_instruction: Vec<DosageInstruction>,
    pub medication_codeable_concept: CodeableConcept,
}

/// DSTU2 MedicationOrder and R4 MedicationRequest share this shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationOrderPartial {
    pub medication_codeable_concept: CodeableConcept,
    pub status: Option<Primitive<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationStatementPartial {
    pub medication_codeable_concept: CodeableConcept,
    pub status: Option<Primitive<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObservationPartial {
    pub category: OneOrMany<CodeableConcept>,
    pub code: CodeableConcept,
    pub status: Option<Primitive<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProcedurePartial {
    pub code: CodeableConcept,
    pub status: Option<Primitive<String>>,
}

/// A resource decoded with the fallback schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    AllergyIntolerance(AllergyIntolerancePartial),
    Condition(ConditionPartial),
    Immunization(ImmunizationPartial),
    MedicationDispense(MedicationDispensePartial),
    MedicationOrder(MedicationOrderPartial),
    MedicationStatement(MedicationStatementPartial),
    Observation(ObservationPartial),
    Procedure(ProcedurePartial),
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
