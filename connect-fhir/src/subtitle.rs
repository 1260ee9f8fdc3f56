//! One-line summaries shown under each record's title.
//!
//! Every resource model, in every tier and release, reduces to the same
//! per-type rule; only the path to the value differs.

use crate::datatypes::{CodeableConcept, Primitive};
use crate::partial::{self, CodeOrConcept, OneOrMany};
use crate::{dstu2, r4, DecodedResource};

const UNKNOWN: &str = "unknown";
const DISPENSED: &str = "Dispensed";

/// Reduces a decoded resource to its display subtitle. Never fails: missing
/// values fall back to a fixed literal.
pub trait Subtitle {
    fn subtitle(&self) -> String;
}

fn or_unknown(value: Option<&str>) -> String {
    value.unwrap_or(UNKNOWN).to_string()
}

fn method_text(method: Option<&CodeableConcept>) -> Option<&str> {
    method.and_then(CodeableConcept::text)
}

impl Subtitle for DecodedResource {
    fn subtitle(&self) -> String {
        match self {
            Self::Dstu2(resource) => resource.subtitle(),
            Self::R4(resource) => resource.subtitle(),
            Self::Partial(resource) => resource.subtitle(),
        }
    }
}

// DSTU2

impl Subtitle for dstu2::Resource {
    fn subtitle(&self) -> String {
        match self {
            Self::AllergyIntolerance(resource) => resource.subtitle(),
            Self::Condition(resource) => resource.subtitle(),
            Self::Immunization(resource) => resource.subtitle(),
            Self::MedicationDispense(resource) => resource.subtitle(),
            Self::MedicationOrder(resource) => resource.subtitle(),
            Self::MedicationStatement(resource) => resource.subtitle(),
            Self::Observation(resource) => resource.subtitle(),
            Self::Procedure(resource) => resource.subtitle(),
        }
    }
}

impl Subtitle for dstu2::AllergyIntolerance {
    fn subtitle(&self) -> String {
        or_unknown(self.category.as_ref().and_then(Primitive::code))
    }
}

impl Subtitle for dstu2::Condition {
    fn subtitle(&self) -> String {
        or_unknown(self.clinical_status.as_ref().and_then(Primitive::as_deref))
    }
}

impl Subtitle for dstu2::Immunization {
    fn subtitle(&self) -> String {
        or_unknown(self.status.code())
    }
}

impl Subtitle for dstu2::MedicationDispense {
    fn subtitle(&self) -> String {
        self.dosage_instruction
            .first()
            .and_then(|instruction| method_text(instruction.method.as_ref()))
            .unwrap_or(DISPENSED)
            .to_string()
    }
}

impl Subtitle for dstu2::MedicationOrder {
    fn subtitle(&self) -> String {
        or_unknown(self.status.as_ref().and_then(Primitive::code))
    }
}

impl Subtitle for dstu2::MedicationStatement {
    fn subtitle(&self) -> String {
        or_unknown(self.status.code())
    }
}

impl Subtitle for dstu2::Observation {
    fn subtitle(&self) -> String {
        or_unknown(self.status.code())
    }
}

impl Subtitle for dstu2::Procedure {
    fn subtitle(&self) -> String {
        or_unknown(self.status.code())
    }
}

// R4

impl Subtitle for r4::Resource {
    fn subtitle(&self) -> String {
        match self {
            Self::AllergyIntolerance(resource) => resource.subtitle(),
            Self::Condition(resource) => resource.subtitle(),
            Self::Immunization(resource) => resource.subtitle(),
            Self::MedicationDispense(resource) => resource.subtitle(),
            Self::MedicationRequest(resource) => resource.subtitle(),
            Self::MedicationStatement(resource) => resource.subtitle(),
            Self::Observation(resource) => resource.subtitle(),
            Self::Procedure(resource) => resource.subtitle(),
        }
    }
}

impl Subtitle for r4::AllergyIntolerance {
    fn subtitle(&self) -> String {
        or_unknown(self.category.first().and_then(Primitive::code))
    }
}

impl Subtitle for r4::Condition {
    fn subtitle(&self) -> String {
        or_unknown(
            self.clinical_status
                .as_ref()
                .and_then(CodeableConcept::first_code),
        )
    }
}

impl Subtitle for r4::Immunization {
    fn subtitle(&self) -> String {
        or_unknown(self.status.code())
    }
}

impl Subtitle for r4::MedicationDispense {
    fn subtitle(&self) -> String {
        self.dosage_instruction
            .first()
            .and_then(|dosage| method_text(dosage.method.as_ref()))
            .unwrap_or(DISPENSED)
            .to_string()
    }
}

impl Subtitle for r4::MedicationRequest {
    fn subtitle(&self) -> String {
        or_unknown(self.status.code())
    }
}

impl Subtitle for r4::MedicationStatement {
    fn subtitle(&self) -> String {
        or_unknown(self.status.code())
    }
}

impl Subtitle for r4::Observation {
    fn subtitle(&self) -> String {
        or_unknown(self.status.code())
    }
}

impl Subtitle for r4::Procedure {
    fn subtitle(&self) -> String {
        or_unknown(self.status.code())
    }
}

// Partial

impl Subtitle for partial::Resource {
    fn subtitle(&self) -> String {
        match self {
            Self::AllergyIntolerance(resource) => resource.subtitle(),
            Self::Condition(resource) => resource.subtitle(),
            Self::Immunization(resource) => resource.subtitle(),
            Self::MedicationDispense(resource) => resource.subtitle(),
            Self::MedicationOrder(resource) => resource.subtitle(),
            Self::MedicationStatement(resource) => resource.subtitle(),
            Self::Observation(resource) => resource.subtitle(),
            Self::Procedure(resource) => resource.subtitle(),
        }
    }
}

fn optional_status(status: Option<&Primitive<String>>) -> String {
    or_unknown(status.and_then(Primitive::as_deref))
}

impl Subtitle for partial::AllergyIntolerancePartial {
    fn subtitle(&self) -> String {
        or_unknown(
            self.category
                .as_ref()
                .and_then(OneOrMany::first)
                .and_then(Primitive::as_deref),
        )
    }
}

impl Subtitle for partial::ConditionPartial {
    fn subtitle(&self) -> String {
        or_unknown(self.clinical_status.as_ref().and_then(CodeOrConcept::code))
    }
}

impl Subtitle for partial::ImmunizationPartial {
    fn subtitle(&self) -> String {
        or_unknown(self.status.as_deref())
    }
}

impl Subtitle for partial::MedicationDispensePartial {
    fn subtitle(&self) -> String {
        self.dosage_instruction
            .first()
            .and_then(|instruction| instruction.method.as_ref())
            .and_then(|method| method.text.as_deref())
            .unwrap_or(DISPENSED)
            .to_string()
    }
}

impl Subtitle for partial::MedicationOrderPartial {
    fn subtitle(&self) -> String {
        optional_status(self.status.as_ref())
    }
}

impl Subtitle for partial::MedicationStatementPartial {
    fn subtitle(&self) -> String {
        optional_status(self.status.as_ref())
    }
}

impl Subtitle for partial::ObservationPartial {
    fn subtitle(&self) -> String {
        optional_status(self.status.as_ref())
    }
}

impl Subtitle for partial::ProcedurePartial {
    fn subtitle(&self) -> String {
        optional_status(self.status.as_ref())
    }
}
