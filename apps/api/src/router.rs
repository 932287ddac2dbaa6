use std::sync::Arc;

use axum::{routing::get, Json, Router};
use chrono::Utc;
use serde_json::{json, Value};

use auth_cell::router::auth_routes;
use patient_cell::router::patient_routes;
use prescription_cell::router::prescription_routes;
use shared_storage::AppState;
use transcription_cell::router::transcription_routes;

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "time": Utc::now().to_rfc3339()
    }))
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .nest("/api/auth", auth_routes(state.clone()))
        .nest("/api/patients", patient_routes(state.clone()))
        .nest(
            "/api",
            transcription_routes(state.clone()).merge(prescription_routes(state)),
        )
}
