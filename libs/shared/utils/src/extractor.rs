use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};

use shared_models::auth::CallerContext;
use shared_models::error::AppError;
use shared_models::records::DoctorProfile;
use shared_storage::AppState;

use crate::jwt::validate_token;

/// Pull the token out of a `Bearer `-prefixed Authorization header.
/// Absence of the header is `Ok(None)`; a present header with the wrong
/// scheme is an error.
pub fn bearer_token(headers: &HeaderMap) -> Result<Option<String>, AppError> {
    let Some(auth_header) = headers.get("Authorization") else {
        return Ok(None);
    };

    let auth_value = auth_header
        .to_str()
        .map_err(|_| AppError::Auth("Invalid authorization header format".to_string()))?;

    let token = auth_value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Auth("Invalid authorization header format".to_string()))?;

    Ok(Some(token.to_string()))
}

/// Required gate: no token, or an invalid one, rejects the request.
pub async fn auth_required(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())?
        .ok_or_else(|| AppError::Auth("Missing authorization header".to_string()))?;

    let claims =
        validate_token(&token, &state.config.jwt_secret).map_err(AppError::Auth)?;

    request
        .extensions_mut()
        .insert(CallerContext::Doctor { doctor_id: claims.sub });

    Ok(next.run(request).await)
}

/// Optional gate: a missing token proceeds with an anonymous caller, but a
/// token that is present and invalid is still rejected.
pub async fn auth_optional(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let caller = match bearer_token(request.headers())? {
        Some(token) => {
            let claims =
                validate_token(&token, &state.config.jwt_secret).map_err(AppError::Auth)?;
            CallerContext::Doctor { doctor_id: claims.sub }
        }
        None => CallerContext::Anonymous,
    };

    request.extensions_mut().insert(caller);
    Ok(next.run(request).await)
}

/// Validate a raw token and load the password-stripped profile of the
/// doctor it names. A valid token for a doctor that no longer exists
/// resolves to `None`.
pub fn resolve_caller(state: &AppState, token: &str) -> Result<Option<DoctorProfile>, AppError> {
    let Ok(claims) = validate_token(token, &state.config.jwt_secret) else {
        return Ok(None);
    };
    state
        .doctors
        .find_profile(&claims.sub)
        .map_err(|e| AppError::Storage(e.to_string()))
}
