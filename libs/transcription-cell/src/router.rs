use std::sync::Arc;

use axum::{middleware, routing::post, Router};

use shared_storage::AppState;
use shared_utils::extractor::auth_optional;

use crate::handlers;

// Optional auth: anonymous transcription is allowed in the demo flow, but
// a supplied token must still be valid.
pub fn transcription_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/transcribe", post(handlers::transcribe))
        .layer(middleware::from_fn_with_state(state.clone(), auth_optional))
        .with_state(state)
}
