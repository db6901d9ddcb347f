use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::extraction::OcrSettings;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Application configuration loaded from environment variables.
/// Fails at startup if `GEMINI_API_KEY` is missing or a numeric value does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub llm_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub ocr: OcrSettings,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_model: env_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            gemini_api_base: env_or("GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE),
            llm_timeout: Duration::from_secs(parse_env("LLM_TIMEOUT_SECS", 120)?),
            port: parse_env("PORT", 5000)?,
            rust_log: env_or("RUST_LOG", "info"),
            upload_dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| std::env::temp_dir()),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            ocr: OcrSettings {
                dpi: parse_env("OCR_DPI", 150)?,
                page_timeout: Duration::from_secs(parse_env("OCR_PAGE_TIMEOUT_SECS", 60)?),
                language: env_or("OCR_LANGUAGE", "eng"),
                pdftoppm_bin: env_or("PDFTOPPM_BIN", "pdftoppm"),
                tesseract_bin: env_or("TESSERACT_BIN", "tesseract"),
            },
        })
    }
}

#[cfg(test)]
impl Config {
    /// Config for router and pipeline tests; uploads and OCR scratch go to `upload_dir`.
    pub fn for_tests(upload_dir: &std::path::Path) -> Self {
        Config {
            gemini_api_key: "test-key".to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            llm_timeout: Duration::from_secs(5),
            port: 0,
            rust_log: "debug".to_string(),
            upload_dir: upload_dir.to_path_buf(),
            max_upload_bytes: 1024 * 1024,
            ocr: OcrSettings::default(),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
