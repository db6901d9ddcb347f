pub mod diagnostics;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::resume::handlers::handle_parse_resume;
use crate::review::handlers::{handle_review, handle_upload_form};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/test-gemini", get(diagnostics::test_gemini_handler))
        // Resume API
        .route("/api/resume/parse", post(handle_parse_resume))
        // Review form (browser)
        .route("/", get(handle_upload_form))
        .route("/review", post(handle_review))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
