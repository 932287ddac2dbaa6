use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use shared_models::auth::CallerContext;
use shared_models::error::AppError;
use shared_models::records::DoctorProfile;
use shared_storage::{AppState, CredentialError};
use shared_utils::jwt::issue_token;

use crate::models::{AuthResponse, LoginRequest, SignupRequest};

#[axum::debug_handler]
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    if request.name.trim().is_empty()
        || request.email.trim().is_empty()
        || request.password.is_empty()
    {
        return Err(AppError::ValidationError(
            "name, email and password are required".to_string(),
        ));
    }

    debug!("Signing up doctor: {}", request.email);

    let doctor = state
        .doctors
        .create(
            &request.name,
            &request.email,
            &request.password,
            &request.specialization,
        )
        .map_err(|e| match e {
            CredentialError::DuplicateEmail(_) => AppError::Conflict(e.to_string()),
            CredentialError::Storage(e) => AppError::Storage(e.to_string()),
        })?;

    let token = issue_token(&doctor.id, &state.config.jwt_secret).map_err(AppError::Internal)?;

    Ok((StatusCode::CREATED, Json(AuthResponse { token, doctor })))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    debug!("Login attempt for: {}", request.email);

    let doctor = state
        .doctors
        .verify(&request.email, &request.password)
        .map_err(|e| AppError::Storage(e.to_string()))?
        .ok_or_else(|| AppError::Auth("Invalid credentials".to_string()))?;

    let token = issue_token(&doctor.id, &state.config.jwt_secret).map_err(AppError::Internal)?;

    Ok(Json(AuthResponse { token, doctor }))
}

/// Profile of the calling doctor, resolved from the bearer token the
/// middleware already validated.
#[axum::debug_handler]
pub async fn me(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<CallerContext>,
) -> Result<Json<DoctorProfile>, AppError> {
    let doctor_id = caller
        .doctor_id()
        .ok_or_else(|| AppError::Auth("Missing authorization header".to_string()))?;

    let profile = state
        .doctors
        .find_profile(doctor_id)
        .map_err(|e| AppError::Storage(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("doctor not found".to_string()))?;

    Ok(Json(profile))
}
