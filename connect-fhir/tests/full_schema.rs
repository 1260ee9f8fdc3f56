use connect_core::{FhirResourcePayload, FhirVersion, ResourceType};
use connect_fhir::{FhirDecoder, FhirRelease, Subtitle};
use serde_json::{json, Value};

fn payload(resource_type: ResourceType, version: FhirVersion, data: Value) -> FhirResourcePayload {
    FhirResourcePayload::new(
        resource_type,
        Some(version),
        serde_json::to_vec(&data).unwrap(),
    )
}

fn assert_full(payload: FhirResourcePayload, release: FhirRelease, subtitle: &str) {
    let decoded = FhirDecoder::default()
        .decode(&payload)
        .unwrap_or_else(|err| panic!("{} failed: {err}", payload.resource_type));
    assert_eq!(decoded.release(), Some(release), "{}", payload.resource_type);
    assert_eq!(decoded.subtitle(), subtitle, "{}", payload.resource_type);
}

#[test]
fn dstu2_resources_decode_with_full_schema() {
    let patient = json!({ "reference": "Patient/example" });
    let concept = json!({ "text": "Example" });
    let cases = vec![
        (
            ResourceType::AllergyIntolerance,
            json!({ "patient": patient, "substance": concept, "category": "food" }),
            "food",
        ),
        (
            ResourceType::Condition,
            json!({
                "patient": patient,
                "code": concept,
                "verificationStatus": "confirmed",
                "clinicalStatus": "active"
            }),
            "active",
        ),
        (
            ResourceType::Immunization,
            json!({
                "status": "completed",
                "vaccineCode": concept,
                "patient": patient,
                "wasNotGiven": false,
                "reported": false
            }),
            "completed",
        ),
        (
            ResourceType::MedicationDispense,
            json!({
                "medicationCodeableConcept": concept,
                "dosageInstruction": [{ "method": { "text": "Swallow" } }]
            }),
            "Swallow",
        ),
        (
            ResourceType::MedicationOrder,
            json!({ "medicationCodeableConcept": concept, "status": "on-hold" }),
            "on-hold",
        ),
        (
            ResourceType::MedicationStatement,
            json!({
                "patient": patient,
                "status": "intended",
                "medicationReference": { "reference": "Medication/1" }
            }),
            "intended",
        ),
        (
            ResourceType::Observation,
            json!({ "status": "final", "code": concept }),
            "final",
        ),
        (
            ResourceType::Procedure,
            json!({ "subject": patient, "status": "aborted", "code": concept }),
            "aborted",
        ),
    ];

    for (resource_type, data, subtitle) in cases {
        assert_full(
            payload(resource_type, FhirVersion::dstu2(), data),
            FhirRelease::Dstu2,
            subtitle,
        );
    }
}

#[test]
fn r4_resources_decode_with_full_schema() {
    let patient = json!({ "reference": "Patient/example" });
    let concept = json!({ "text": "Example" });
    let cases = vec![
        (
            ResourceType::AllergyIntolerance,
            json!({ "patient": patient, "category": ["environment", "food"], "code": concept }),
            "environment",
        ),
        (
            ResourceType::Condition,
            json!({
                "subject": patient,
                "clinicalStatus": {
                    "coding": [{
                        "system": "http://terminology.hl7.org/CodeSystem/condition-clinical",
                        "code": "resolved"
                    }]
                }
            }),
            "resolved",
        ),
        (
            ResourceType::Immunization,
            json!({
                "status": "not-done",
                "vaccineCode": concept,
                "patient": patient,
                "occurrenceDateTime": "2020-01-01"
            }),
            "not-done",
        ),
        (
            ResourceType::MedicationDispense,
            json!({ "status": "completed", "medicationCodeableConcept": concept }),
            "Dispensed",
        ),
        (
            ResourceType::MedicationRequest,
            json!({
                "status": "active",
                "intent": "order",
                "subject": patient,
                "medicationCodeableConcept": concept
            }),
            "active",
        ),
        (
            ResourceType::MedicationStatement,
            json!({
                "status": "not-taken",
                "subject": patient,
                "medicationCodeableConcept": concept
            }),
            "not-taken",
        ),
        (
            ResourceType::Observation,
            json!({ "status": "amended", "code": concept }),
            "amended",
        ),
        (
            ResourceType::Procedure,
            json!({ "status": "in-progress", "subject": patient }),
            "in-progress",
        ),
    ];

    for (resource_type, data, subtitle) in cases {
        assert_full(
            payload(resource_type, FhirVersion::r4(), data),
            FhirRelease::R4,
            subtitle,
        );
    }
}

#[test]
fn missing_optional_display_field_reads_unknown() {
    let decoded = FhirDecoder::default()
        .decode(&payload(
            ResourceType::Condition,
            FhirVersion::r4(),
            json!({ "subject": { "reference": "Patient/example" } }),
        ))
        .unwrap();
    assert_eq!(decoded.release(), Some(FhirRelease::R4));
    assert_eq!(decoded.subtitle(), "unknown");
}
