use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::llm_client::prompts::PING_PROMPT;
use crate::state::AppState;

/// GET /test-gemini
/// Sends a trivial prompt to the language model and returns its raw reply as text.
pub async fn test_gemini_handler(State(state): State<AppState>) -> Response {
    match state.llm.generate(PING_PROMPT).await {
        Ok(reply) => reply.into_response(),
        Err(e) => {
            tracing::error!("Gemini test failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
