use axum::extract::State;
use axum::Json;
use axum_extra::TypedHeader;
use headers::Authorization;

use prescription_cell::handlers;
use prescription_cell::models::GenerateRequest;
use shared_models::error::AppError;
use shared_utils::jwt::issue_token;
use shared_utils::test_utils::{TestEnv, TEST_JWT_SECRET};

fn auth_header(token: &str) -> TypedHeader<Authorization<headers::authorization::Bearer>> {
    TypedHeader(Authorization::bearer(token).unwrap())
}

fn doctor_token(env: &TestEnv) -> String {
    let profile = env
        .state
        .doctors
        .create("Dr. Ada", "ada@clinic.test", "s3cret", "Cardiology")
        .unwrap();
    issue_token(&profile.id, TEST_JWT_SECRET).unwrap()
}

fn generate_request(patient_id: Option<&str>) -> GenerateRequest {
    GenerateRequest {
        transcription: "patient reports mild headache since morning".to_string(),
        patient_id: patient_id.map(str::to_string),
        doctor_notes: "no red flags".to_string(),
    }
}

#[tokio::test]
async fn empty_transcription_is_rejected() {
    let env = TestEnv::new();
    let token = doctor_token(&env);

    let err = handlers::generate_prescription(
        State(env.state.clone()),
        auth_header(&token),
        Json(GenerateRequest {
            transcription: "  ".to_string(),
            patient_id: None,
            doctor_notes: String::new(),
        }),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn generation_without_patient_id_persists_nothing() {
    let env = TestEnv::new();
    let token = doctor_token(&env);

    let Json(result) = handlers::generate_prescription(
        State(env.state.clone()),
        auth_header(&token),
        Json(generate_request(None)),
    )
    .await
    .unwrap();

    assert!(!result.prescription.is_empty());
    assert!(env.state.patients.list().unwrap().is_empty());
}

#[tokio::test]
async fn generation_records_against_a_stubbed_patient() {
    let env = TestEnv::new();
    let token = doctor_token(&env);

    handlers::generate_prescription(
        State(env.state.clone()),
        auth_header(&token),
        Json(generate_request(Some("PAT_NEW"))),
    )
    .await
    .unwrap();

    let patient = env.state.patients.get("PAT_NEW").unwrap().unwrap();
    assert_eq!(patient.name, "Unknown");
    assert_eq!(patient.consultations.len(), 1);

    let consultation = &patient.consultations[0];
    assert_eq!(
        consultation.transcription,
        "patient reports mild headache since morning"
    );
    assert!(!consultation.prescription.is_empty());
    assert_eq!(consultation.insights["provider"], "mock");

    // a second draft appends rather than replaces
    handlers::generate_prescription(
        State(env.state.clone()),
        auth_header(&token),
        Json(generate_request(Some("PAT_NEW"))),
    )
    .await
    .unwrap();

    let patient = env.state.patients.get("PAT_NEW").unwrap().unwrap();
    assert_eq!(patient.consultations.len(), 2);
}

#[tokio::test]
async fn unknown_caller_still_generates() {
    // resolve_caller tolerates a token for a doctor that no longer exists;
    // the prompt just loses its personalization
    let env = TestEnv::new();
    let token = issue_token("DR_GONE42", TEST_JWT_SECRET).unwrap();

    let Json(result) = handlers::generate_prescription(
        State(env.state.clone()),
        auth_header(&token),
        Json(generate_request(None)),
    )
    .await
    .unwrap();
    assert!(!result.prescription.is_empty());
}
