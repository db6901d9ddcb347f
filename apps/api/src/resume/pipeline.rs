//! Resume parsing pipeline, shared by the JSON endpoint and the review form.
//!
//! Flow: receive upload → extract text → delete upload → model extraction →
//! regex fallback on any model-path failure.
//!
//! Only upload and text-extraction failures reach the caller. Once text exists,
//! the result is always some profile.

use axum::extract::Multipart;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extraction;
use crate::llm_client::TextGenerator;
use crate::models::profile::{Profile, ProfileSource};
use crate::profile::extractor::extract_profile;
use crate::profile::fallback::fallback_profile;
use crate::resume::upload::{receive_upload, StoredUpload};
use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub profile: Profile,
    pub source: ProfileSource,
}

pub async fn parse_upload(
    multipart: &mut Multipart,
    state: &AppState,
) -> Result<ParseOutcome, AppError> {
    let upload = receive_upload(multipart, &state.config.upload_dir).await?;
    info!("Received '{}' ({:?})", upload.filename, upload.kind);
    parse_stored(upload, state).await
}

pub async fn parse_stored(upload: StoredUpload, state: &AppState) -> Result<ParseOutcome, AppError> {
    let text = extraction::extract_text(
        upload.path(),
        upload.kind,
        &state.config.upload_dir,
        &state.config.ocr,
    )
    .await;
    upload.discard();

    let text = text?;
    info!("Extracted {} characters of resume text", text.chars().count());

    Ok(profile_from_text(&text, state.llm.as_ref()).await)
}

/// Model extraction with the regex fallback. Never fails.
pub async fn profile_from_text(text: &str, llm: &dyn TextGenerator) -> ParseOutcome {
    match extract_profile(text, llm).await {
        Ok(profile) => {
            info!(
                "Profile extracted by {} ({} of 10 fields filled)",
                llm.model(),
                profile.filled_count()
            );
            ParseOutcome {
                profile,
                source: ProfileSource::Model,
            }
        }
        Err(e) => {
            warn!("Model extraction failed, fallback used: {e}");
            ParseOutcome {
                profile: fallback_profile(text),
                source: ProfileSource::Fallback,
            }
        }
    }
}
