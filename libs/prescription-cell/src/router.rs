use std::sync::Arc;

use axum::{middleware, routing::post, Router};

use shared_storage::AppState;
use shared_utils::extractor::auth_required;

use crate::handlers;

pub fn prescription_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/generate-prescription", post(handlers::generate_prescription))
        .layer(middleware::from_fn_with_state(state.clone(), auth_required))
        .with_state(state)
}
