use serde::{Deserialize, Serialize};

use crate::sample::{ClinicalType, QuantityType, SampleType};

/// Groups of categories on the main screen.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    HealthRecords,
    FitnessData,
}

impl Section {
    pub const ALL: [Section; 2] = [Section::HealthRecords, Section::FitnessData];

    pub fn display_name(self) -> &'static str {
        match self {
            Self::HealthRecords => "Health Records",
            Self::FitnessData => "Fitness Data",
        }
    }

    /// Sample types listed under this section, in display order.
    pub fn types(self) -> Vec<SampleType> {
        match self {
            Self::HealthRecords => [
                ClinicalType::AllergyRecord,
                ClinicalType::VitalSignRecord,
                ClinicalType::ConditionRecord,
                ClinicalType::ImmunizationRecord,
                ClinicalType::LabResultRecord,
                ClinicalType::MedicationRecord,
                ClinicalType::ProcedureRecord,
            ]
            .into_iter()
            .map(SampleType::Clinical)
            .collect(),
            Self::FitnessData => [QuantityType::StepCount, QuantityType::DistanceWalkingRunning]
                .into_iter()
                .map(SampleType::Quantity)
                .collect(),
        }
    }

    /// Every sample type the app asks permission to read.
    pub fn read_types() -> Vec<SampleType> {
        Self::ALL.into_iter().flat_map(Section::types).collect()
    }
}

impl SampleType {
    /// Title of the category screen for this sample type.
    pub fn category_display_name(&self) -> String {
        let name = match self {
            Self::Clinical(clinical) => match clinical {
                ClinicalType::AllergyRecord => "Allergies",
                ClinicalType::ConditionRecord => "Conditions",
                ClinicalType::ImmunizationRecord => "Immunizations",
                ClinicalType::LabResultRecord => "Lab Results",
                ClinicalType::MedicationRecord => "Medications",
                ClinicalType::ProcedureRecord => "Procedures",
                ClinicalType::VitalSignRecord => "Clinical Vitals",
                ClinicalType::Other(_) => return self.identifier(),
            },
            Self::Quantity(QuantityType::StepCount) => "Steps",
            Self::Quantity(QuantityType::DistanceWalkingRunning) => "Walking + Running Distances",
            Self::Quantity(QuantityType::Other(_)) | Self::Other(_) => return self.identifier(),
        };
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_types_cover_both_sections() {
        let types = Section::read_types();
        assert_eq!(types.len(), 9);
        assert!(types.contains(&SampleType::Quantity(QuantityType::StepCount)));
        assert_eq!(types[0].category_display_name(), "Allergies");
        assert_eq!(types[1].category_display_name(), "Clinical Vitals");
    }

    #[test]
    fn unknown_types_display_their_identifier() {
        let other = SampleType::Quantity(QuantityType::Other(
            "HKQuantityTypeIdentifierHeartRate".to_string(),
        ));
        assert_eq!(
            other.category_display_name(),
            "HKQuantityTypeIdentifierHeartRate"
        );
    }
}
