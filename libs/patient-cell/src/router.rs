use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use shared_storage::AppState;
use shared_utils::extractor::auth_required;

use crate::handlers::*;

pub fn patient_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(list_patients))
        .route("/", post(create_patient))
        .route("/{id}", get(get_patient))
        .route("/{id}", put(update_patient))
        .route("/{id}/consultations", get(list_consultations))
        .route("/{id}/consultations", post(add_consultation))
        .route("/{id}/insights", get(patient_insights))
        .layer(middleware::from_fn_with_state(state.clone(), auth_required))
        .with_state(state)
}
