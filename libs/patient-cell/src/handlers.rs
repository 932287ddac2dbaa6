use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use shared_models::error::AppError;
use shared_models::records::{Consultation, Patient};
use shared_storage::ids::make_id;
use shared_storage::{AppState, IfMissing};

use crate::models::{
    AddConsultationRequest, CreatePatientRequest, PatientInsights, UpdatePatientRequest,
};
use crate::services::insights::compute_insights;
use crate::services::recorder::utc_timestamp;

fn load_patient(state: &AppState, patient_id: &str) -> Result<Patient, AppError> {
    state
        .patients
        .get(patient_id)
        .map_err(|e| AppError::Storage(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("patient not found".to_string()))
}

#[axum::debug_handler]
pub async fn list_patients(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let patients = state
        .patients
        .list()
        .map_err(|e| AppError::Storage(e.to_string()))?;

    Ok(Json(json!({ "patients": patients })))
}

#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreatePatientRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::ValidationError("name required".to_string()));
    }

    let patient = Patient {
        id: make_id("PAT"),
        name: request.name,
        age: request.age,
        gender: request.gender,
        consultations: Vec::new(),
    };

    debug!("Creating patient {}", patient.id);

    state
        .patients
        .upsert(patient.clone())
        .map_err(|e| AppError::Storage(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(json!({ "patient": patient }))))
}

#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let patient = load_patient(&state, &patient_id)?;
    Ok(Json(json!({ "patient": patient })))
}

#[axum::debug_handler]
pub async fn update_patient(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<String>,
    Json(request): Json<UpdatePatientRequest>,
) -> Result<Json<Value>, AppError> {
    let patient = state
        .patients
        .mutate(&patient_id, IfMissing::Reject, |patient| {
            if let Some(name) = request.name {
                patient.name = name;
            }
            if let Some(age) = request.age {
                patient.age = Some(age);
            }
            if let Some(gender) = request.gender {
                patient.gender = Some(gender);
            }
        })
        .map_err(|e| AppError::Storage(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("patient not found".to_string()))?;

    Ok(Json(json!({ "patient": patient })))
}

#[axum::debug_handler]
pub async fn list_consultations(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let patient = load_patient(&state, &patient_id)?;
    Ok(Json(json!({ "consultations": patient.consultations })))
}

/// Manual consultation entry. Unlike the generation path, this one does
/// not stub missing patients: an unknown id is a 404.
#[axum::debug_handler]
pub async fn add_consultation(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<String>,
    Json(request): Json<AddConsultationRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let consultation = Consultation {
        id: make_id("CONS"),
        date: request.date.unwrap_or_else(utc_timestamp),
        transcription: request.transcription,
        prescription: request.prescription,
        ai_summary: request.ai_summary,
        insights: request.insights,
    };

    state
        .patients
        .mutate(&patient_id, IfMissing::Reject, |patient| {
            patient.consultations.push(consultation.clone());
        })
        .map_err(|e| AppError::Storage(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("patient not found".to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "consultation": consultation })),
    ))
}

#[axum::debug_handler]
pub async fn patient_insights(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<String>,
) -> Result<Json<PatientInsights>, AppError> {
    let patient = load_patient(&state, &patient_id)?;
    Ok(Json(compute_insights(&patient)))
}
