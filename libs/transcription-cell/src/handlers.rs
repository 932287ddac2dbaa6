use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::json;
use tracing::warn;

use shared_models::error::AppError;
use shared_storage::AppState;

use crate::models::{allowed_audio_file, TranscribeRequest, TranscriptionResponse};
use crate::services::transcriber::SpeechToTextClient;

/// Transcribe an uploaded audio file. Upstream failures never abort the
/// request: they degrade to an empty transcription with the error recorded
/// in the metadata, so the caller can still edit the draft by hand.
#[axum::debug_handler]
pub async fn transcribe(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TranscribeRequest>,
) -> Result<Json<TranscriptionResponse>, AppError> {
    if request.audio_path.trim().is_empty() {
        return Err(AppError::ValidationError(
            "audio_path is required".to_string(),
        ));
    }

    if !allowed_audio_file(&request.audio_path) {
        return Err(AppError::BadRequest("Unsupported file type".to_string()));
    }

    let client = SpeechToTextClient::new(&state.config);

    let response = match client.transcribe(&request.audio_path).await {
        Ok((transcription, metadata)) => TranscriptionResponse {
            transcription,
            metadata,
        },
        Err(e) => {
            warn!("Transcription failed for {}: {}", request.audio_path, e);
            TranscriptionResponse {
                transcription: String::new(),
                metadata: json!({ "error": e.to_string() }),
            }
        }
    };

    Ok(Json(response))
}
