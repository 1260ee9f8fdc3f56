use connect_core::{FhirResourcePayload, FhirVersion, ResourceType};
use connect_fhir::{DecodingError, FhirDecoder, Subtitle};
use serde_json::{json, Value};

fn payload(resource_type: ResourceType, version: FhirVersion, data: Value) -> FhirResourcePayload {
    FhirResourcePayload::new(
        resource_type,
        Some(version),
        serde_json::to_vec(&data).unwrap(),
    )
}

fn concept() -> Value {
    json!({ "coding": [{ "system": "http://snomed.info/sct", "code": "271807003" }] })
}

#[test]
fn near_conformant_r4_resources_fall_back_to_partial_schema() {
    let cases = vec![
        (ResourceType::AllergyIntolerance, json!({ "code": concept() }), "unknown"),
        (
            ResourceType::Condition,
            json!({ "category": [concept()], "code": concept() }),
            "unknown",
        ),
        (ResourceType::Immunization, json!({ "status": "completed" }), "completed"),
        (
            ResourceType::MedicationDispense,
            json!({ "medicationCodeableConcept": concept() }),
            "Dispensed",
        ),
        (
            ResourceType::MedicationRequest,
            json!({ "medicationCodeableConcept": concept() }),
            "unknown",
        ),
        (
            ResourceType::MedicationStatement,
            json!({ "medicationCodeableConcept": concept(), "status": "active" }),
            "active",
        ),
        (
            ResourceType::Observation,
            json!({ "category": [concept()], "code": concept() }),
            "unknown",
        ),
        (ResourceType::Procedure, json!({ "code": concept() }), "unknown"),
    ];

    for (resource_type, data, subtitle) in cases {
        let decoded = FhirDecoder::default()
            .decode(&payload(resource_type.clone(), FhirVersion::r4(), data))
            .unwrap_or_else(|err| panic!("{resource_type} failed: {err}"));
        assert!(decoded.is_partial(), "{resource_type}");
        assert_eq!(decoded.release(), None, "{resource_type}");
        assert_eq!(decoded.subtitle(), subtitle, "{resource_type}");
    }
}

#[test]
fn near_conformant_dstu2_resources_fall_back_to_partial_schema() {
    // Each payload misses a DSTU2 required field or carries a mistyped one.
    let cases = vec![
        (ResourceType::AllergyIntolerance, json!({ "substance": concept() }), "unknown"),
        (
            ResourceType::AllergyIntolerance,
            json!({ "substance": concept(), "category": "food" }),
            "food",
        ),
        (
            ResourceType::Condition,
            json!({ "category": concept(), "code": concept() }),
            "unknown",
        ),
        (
            ResourceType::Condition,
            json!({ "category": concept(), "code": concept(), "clinicalStatus": "active" }),
            "active",
        ),
        (ResourceType::Immunization, json!({ "status": "completed" }), "completed"),
        (
            ResourceType::MedicationDispense,
            json!({ "medicationCodeableConcept": concept(), "whenHandedOver": 20200101 }),
            "Dispensed",
        ),
        (
            ResourceType::MedicationOrder,
            json!({ "medicationCodeableConcept": concept(), "dateWritten": 20200101 }),
            "unknown",
        ),
        (
            ResourceType::MedicationStatement,
            json!({ "medicationCodeableConcept": concept() }),
            "unknown",
        ),
        (
            ResourceType::Observation,
            json!({ "category": concept(), "code": concept() }),
            "unknown",
        ),
        (ResourceType::Procedure, json!({ "code": concept() }), "unknown"),
    ];

    for (resource_type, data, subtitle) in cases {
        let decoded = FhirDecoder::default()
            .decode(&payload(resource_type.clone(), FhirVersion::dstu2(), data))
            .unwrap_or_else(|err| panic!("{resource_type} failed: {err}"));
        assert!(decoded.is_partial(), "{resource_type}");
        assert_eq!(decoded.subtitle(), subtitle, "{resource_type}");
    }
}

#[test]
fn dstu2_condition_without_patient_keeps_bare_clinical_status() {
    let decoded = FhirDecoder::default()
        .decode(&payload(
            ResourceType::Condition,
            FhirVersion::dstu2(),
            json!({ "category": concept(), "code": concept(), "clinicalStatus": "remission" }),
        ))
        .unwrap();
    assert!(decoded.is_partial());
    assert_eq!(decoded.subtitle(), "remission");
}

#[test]
fn partial_dispense_reads_dosage_method() {
    let decoded = FhirDecoder::default()
        .decode(&payload(
            ResourceType::MedicationDispense,
            FhirVersion::r4(),
            json!({
                "medicationCodeableConcept": concept(),
                "dosageInstruction": [{ "method": { "coding": [], "text": "Apply topically" } }]
            }),
        ))
        .unwrap();
    assert!(decoded.is_partial());
    assert_eq!(decoded.subtitle(), "Apply topically");
}

#[test]
fn failing_both_schemas_reports_both_errors() {
    let err = FhirDecoder::default()
        .decode(&payload(ResourceType::Condition, FhirVersion::dstu2(), json!({})))
        .unwrap_err();

    match err {
        DecodingError::SchemaMismatch {
            resource_type,
            full,
            partial,
        } => {
            assert_eq!(resource_type, ResourceType::Condition);
            assert!(full.contains("patient"), "{full}");
            assert!(partial.contains("category"), "{partial}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn invalid_json_is_malformed() {
    let err = FhirDecoder::default()
        .decode(&FhirResourcePayload::new(
            ResourceType::Observation,
            Some(FhirVersion::r4()),
            b"{\"status\": ".to_vec(),
        ))
        .unwrap_err();
    assert!(matches!(err, DecodingError::MalformedJson { .. }), "{err}");
}

#[test]
fn wrong_code_in_partial_status_is_still_displayed() {
    let decoded = FhirDecoder::default()
        .decode(&payload(
            ResourceType::Observation,
            FhirVersion::r4(),
            json!({ "status": "draft", "category": [concept()], "code": concept() }),
        ))
        .unwrap();
    assert!(decoded.is_partial());
    assert_eq!(decoded.subtitle(), "draft");
}
