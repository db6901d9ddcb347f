//! Profile Extractor: asks the language model for a structured profile.
//!
//! Flow: length check (local, before any network call) → prompt with the
//! resume truncated to `MAX_PROMPT_RESUME_CHARS` → single model call →
//! first `{` through last `}` of the reply → JSON parse → schema coercion.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::llm_client::{LlmError, TextGenerator};
use crate::models::profile::Profile;
use crate::profile::prompts::PROFILE_PARSE_PROMPT;

/// Trimmed resume text shorter than this is rejected without calling the model.
pub const MIN_RESUME_CHARS: usize = 100;
/// Resume text beyond this many characters is cut off before prompting.
pub const MAX_PROMPT_RESUME_CHARS: usize = 12_000;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Resume text too short ({chars} characters, need at least {MIN_RESUME_CHARS})")]
    InputTooShort { chars: usize },

    #[error("Model reply did not contain a JSON object")]
    NoJsonFound,

    #[error("Model reply contained invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Language model unavailable: {0}")]
    ModelUnavailable(#[from] LlmError),
}

pub async fn extract_profile(
    resume_text: &str,
    llm: &dyn TextGenerator,
) -> Result<Profile, ProfileError> {
    let chars = resume_text.trim().chars().count();
    if chars < MIN_RESUME_CHARS {
        return Err(ProfileError::InputTooShort { chars });
    }

    let prompt = build_prompt(resume_text);
    let reply = llm.generate(&prompt).await?;
    debug!("Model reply: {} chars", reply.len());

    parse_reply(&reply)
}

pub fn build_prompt(resume_text: &str) -> String {
    PROFILE_PARSE_PROMPT.replace(
        "{resume_text}",
        truncate_chars(resume_text, MAX_PROMPT_RESUME_CHARS),
    )
}

/// Parses a raw model reply into a validated profile.
pub fn parse_reply(reply: &str) -> Result<Profile, ProfileError> {
    let json = extract_json_object(reply).ok_or(ProfileError::NoJsonFound)?;
    let value: Value =
        serde_json::from_str(json).map_err(|e| ProfileError::InvalidJson(e.to_string()))?;
    Profile::from_model_value(value)
        .map_err(|_| ProfileError::InvalidJson("top-level value is not an object".to_string()))
}

/// Returns the span from the first `{` to the last `}` in `reply`, if any.
///
/// Tolerates prose and code fences around the object. Greedy on purpose: a
/// nested object or a trailing `}` in prose is included, and the JSON parse decides.
pub fn extract_json_object(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&reply[start..=end])
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
