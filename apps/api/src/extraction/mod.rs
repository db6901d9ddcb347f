//! Text extraction: turns an uploaded resume file into raw text.
//!
//! Dispatch is by file extension: `.pdf` goes through the PDF text layer and,
//! when that yields almost nothing, through OCR; `.docx` goes through the DOCX
//! reader. Anything else is rejected up front.
//!
//! Empty output is not an error here; the profile stage decides what to do with it.

use std::path::Path;
use std::time::Duration;

use thiserror::Error;
use tracing::info;

pub mod docx;
pub mod ocr;
pub mod pdf;

/// A PDF whose text layer has fewer characters than this is treated as scanned.
pub const SCANNED_PDF_THRESHOLD: usize = 50;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0} (expected .pdf or .docx)")]
    UnsupportedFileType(String),

    #[error("PDF text extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX text extraction failed: {0}")]
    Docx(String),

    #[error("PDF page rendering failed: {0}")]
    Rasterize(String),

    #[error("PDF page rendering produced no pages")]
    NoPages,

    #[error("OCR failed on page {page}: {message}")]
    Recognition { page: usize, message: String },

    #[error("OCR timed out on page {page}")]
    OcrTimeout { page: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Accepted upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Infers the kind from the original filename's extension (case-insensitive).
    pub fn from_filename(filename: &str) -> Result<Self, ExtractionError> {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("pdf") => Ok(DocumentKind::Pdf),
            Some("docx") => Ok(DocumentKind::Docx),
            _ => Err(ExtractionError::UnsupportedFileType(filename.to_string())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Docx => "docx",
        }
    }
}

/// External OCR tooling settings.
#[derive(Debug, Clone)]
pub struct OcrSettings {
    pub dpi: u32,
    /// Upper bound for recognizing a single page.
    pub page_timeout: Duration,
    pub language: String,
    pub pdftoppm_bin: String,
    pub tesseract_bin: String,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            dpi: 150,
            page_timeout: Duration::from_secs(60),
            language: "eng".to_string(),
            pdftoppm_bin: "pdftoppm".to_string(),
            tesseract_bin: "tesseract".to_string(),
        }
    }
}

/// True when a PDF text layer is too thin to be a real text PDF.
pub fn needs_ocr(text_layer: &str) -> bool {
    text_layer.chars().count() < SCANNED_PDF_THRESHOLD
}

/// Extracts raw text from `path`.
///
/// `scratch_dir` is where the OCR path creates its request-scoped working directory.
pub async fn extract_text(
    path: &Path,
    kind: DocumentKind,
    scratch_dir: &Path,
    ocr_settings: &OcrSettings,
) -> Result<String, ExtractionError> {
    match kind {
        DocumentKind::Pdf => {
            let text = pdf::extract_text_layer(path).await?;
            if needs_ocr(&text) {
                info!(
                    "Scanned PDF detected ({} chars in text layer), using OCR",
                    text.chars().count()
                );
                return ocr::ocr_pdf(path, scratch_dir, ocr_settings).await;
            }
            Ok(text)
        }
        DocumentKind::Docx => docx::extract_raw_text(path).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_pdf() {
        assert_eq!(DocumentKind::from_filename("cv.pdf").unwrap(), DocumentKind::Pdf);
    }

    #[test]
    fn test_kind_docx_uppercase() {
        assert_eq!(
            DocumentKind::from_filename("Jane Doe Resume.DOCX").unwrap(),
            DocumentKind::Docx
        );
    }

    #[test]
    fn test_kind_rejects_other_extensions() {
        for name in ["resume.txt", "scan.png", "resume.doc", "resume", "pdf", ".pdf.bak"] {
            assert!(
                matches!(
                    DocumentKind::from_filename(name),
                    Err(ExtractionError::UnsupportedFileType(_))
                ),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn test_extension_round_trips_through_filename() {
        for kind in [DocumentKind::Pdf, DocumentKind::Docx] {
            let name = format!("upload.{}", kind.extension());
            assert_eq!(DocumentKind::from_filename(&name).unwrap(), kind);
        }
    }

    #[test]
    fn test_needs_ocr_below_threshold() {
        assert!(needs_ocr(""));
        assert!(needs_ocr(&"a".repeat(49)));
    }

    #[test]
    fn test_needs_ocr_at_threshold() {
        assert!(!needs_ocr(&"a".repeat(50)));
        assert!(!needs_ocr(&"a".repeat(500)));
    }

    #[test]
    fn test_needs_ocr_counts_chars_not_bytes() {
        // 49 two-byte characters: 98 bytes but still below the threshold.
        assert!(needs_ocr(&"é".repeat(49)));
    }

    #[tokio::test]
    async fn test_extract_text_docx_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.docx");
        std::fs::write(&path, docx::tests::build_docx(&["Jane Doe", "Rust engineer"])).unwrap();

        let text = extract_text(&path, DocumentKind::Docx, dir.path(), &OcrSettings::default())
            .await
            .unwrap();
        assert_eq!(text, "Jane Doe\nRust engineer\n");
    }

    #[tokio::test]
    async fn test_extract_text_pdf_garbage_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        let err = extract_text(&path, DocumentKind::Pdf, dir.path(), &OcrSettings::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Pdf(_)));
    }

    #[tokio::test]
    async fn test_extract_text_pdf_with_text_layer_skips_ocr() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.pdf");
        std::fs::write(
            &path,
            pdf::tests::build_pdf(&[
                "Jane Doe",
                "Backend engineer building Rust and Go services since 2019",
            ]),
        )
        .unwrap();
        // Any attempt to rasterize would fail with this binary.
        let settings = OcrSettings {
            pdftoppm_bin: "/nonexistent/pdftoppm".into(),
            ..OcrSettings::default()
        };

        let text = extract_text(&path, DocumentKind::Pdf, dir.path(), &settings)
            .await
            .unwrap();
        assert!(!needs_ocr(&text));
        assert!(text.contains("Jane Doe"), "text layer was {text:?}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_extract_text_scanned_pdf_uses_ocr() {
        use ocr::tests::fake_tools::write_script;

        let _guard = ocr::tests::TOOLS_LOCK.lock().await;
        let bin = tempfile::tempdir().unwrap();
        let scratch = tempfile::tempdir().unwrap();
        let path = bin.path().join("scan.pdf");
        std::fs::write(&path, pdf::tests::build_pdf(&["short"])).unwrap();

        let settings = OcrSettings {
            pdftoppm_bin: write_script(
                bin.path(),
                "pdftoppm",
                r#"printf 'Jane Doe\nRecognized from the scan\n' > "$5-1.png""#,
            ),
            tesseract_bin: write_script(bin.path(), "tesseract", r#"cat "$1""#),
            ..OcrSettings::default()
        };

        let text = extract_text(&path, DocumentKind::Pdf, scratch.path(), &settings)
            .await
            .unwrap();
        assert_eq!(text, "Jane Doe\nRecognized from the scan\n");
        assert!(std::fs::read_dir(scratch.path()).unwrap().next().is_none());
    }
}
