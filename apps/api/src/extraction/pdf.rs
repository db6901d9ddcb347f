use std::path::Path;

use super::ExtractionError;

/// Reads the embedded text layer of a PDF.
///
/// `pdf_extract` is synchronous and may panic on malformed input, so it runs on
/// the blocking pool; a panic surfaces as an extraction error.
pub async fn extract_text_layer(path: &Path) -> Result<String, ExtractionError> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || pdf_extract::extract_text(&path))
        .await
        .map_err(|e| ExtractionError::Pdf(format!("PDF parser aborted: {e}")))?
        .map_err(|e| ExtractionError::Pdf(e.to_string()))
}
