//! Axum route handlers for the Resume API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::Profile;
use crate::resume::pipeline::parse_upload;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ParseResumeResponse {
    pub success: bool,
    pub profile: Profile,
}

/// POST /api/resume/parse
///
/// Multipart upload with a single `resume` field (.pdf or .docx).
/// Responds with a model-extracted profile, or the regex fallback when the
/// model path fails. Only upload and text-extraction errors are surfaced.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ParseResumeResponse>, AppError> {
    let span = info_span!("parse_resume", request_id = %Uuid::new_v4());
    async move {
        let outcome = parse_upload(&mut multipart, &state).await?;
        Ok(Json(ParseResumeResponse {
            success: true,
            profile: outcome.profile,
        }))
    }
    .instrument(span)
    .await
}
