use axum::{
    extract::{Multipart, State},
    response::{Html, IntoResponse, Response},
};
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::resume::pipeline::parse_upload;
use crate::review::render::{render_review_page, render_upload_page};
use crate::review::ReviewForm;
use crate::state::AppState;

/// GET /
pub async fn handle_upload_form() -> Html<String> {
    Html(render_upload_page(None))
}

/// POST /review
///
/// Same pipeline as `POST /api/resume/parse`, rendered as a read-only form.
/// Failures re-render the upload form with an error banner and the error's status.
pub async fn handle_review(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let span = info_span!("review_resume", request_id = %Uuid::new_v4());
    async move {
        match parse_upload(&mut multipart, &state).await {
            Ok(outcome) => {
                let form = ReviewForm::from_profile(&outcome.profile, outcome.source);
                Html(render_review_page(&form)).into_response()
            }
            Err(e) => {
                tracing::warn!("Review upload failed: {e}");
                (e.status(), Html(render_upload_page(Some(&e.client_message())))).into_response()
            }
        }
    }
    .instrument(span)
    .await
}
