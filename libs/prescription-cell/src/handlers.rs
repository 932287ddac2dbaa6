use std::sync::Arc;

use axum::{extract::State, Json};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use tracing::debug;

use patient_cell::ConsultationRecorder;
use shared_models::error::AppError;
use shared_storage::AppState;
use shared_utils::extractor::resolve_caller;

use crate::models::{GenerateRequest, GenerationResult, PromptContext};
use crate::services::generator::PrescriptionGenerator;

/// Generate a draft prescription from a consultation transcription.
///
/// Upstream failure here is a hard error: a prescription draft is never
/// fabricated locally. When a patient id is supplied, the draft is also
/// recorded against that patient, stubbing the profile if it is missing.
#[axum::debug_handler]
pub async fn generate_prescription(
    State(state): State<Arc<AppState>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerationResult>, AppError> {
    if request.transcription.trim().is_empty() {
        return Err(AppError::ValidationError(
            "transcription is required".to_string(),
        ));
    }

    // Caller profile for prompt personalization; the gate has already
    // validated the token.
    let doctor = resolve_caller(&state, auth.token())?;

    let ctx = PromptContext {
        transcription: request.transcription.clone(),
        patient_id: request.patient_id.clone(),
        doctor_notes: request.doctor_notes.clone(),
        doctor,
    };

    let generator = PrescriptionGenerator::new(&state.config);
    let result = generator
        .generate(&ctx)
        .await
        .map_err(|e| AppError::ExternalService(e.to_string()))?;

    if let Some(patient_id) = &request.patient_id {
        let insights = result
            .metadata
            .as_object()
            .cloned()
            .unwrap_or_default();

        let consultation = ConsultationRecorder::new(&state.patients)
            .record(
                patient_id,
                &request.transcription,
                &result.prescription,
                &result.ai_summary,
                insights,
            )
            .map_err(|e| AppError::Storage(e.to_string()))?;

        debug!(
            "Recorded consultation {} from generated draft",
            consultation.id
        );
    }

    Ok(Json(result))
}
