//! OCR fallback for scanned PDFs: `pdftoppm` renders each page to PNG inside a
//! request-scoped temp directory, then `tesseract` recognizes each page in order.
//!
//! The temp directory is a `TempDir`, so it is removed when this function
//! returns, errors, or is cancelled. Child processes are killed on drop.
//!
//! Each page's text is trimmed at the end (tesseract closes every page with a
//! newline and a form feed) and then terminated with a single `\n`.

use std::path::{Path, PathBuf};
use std::process::Output;

use tokio::process::Command;
use tracing::{debug, info};

use super::{ExtractionError, OcrSettings};

const PAGE_PREFIX: &str = "page";

pub async fn ocr_pdf(
    pdf: &Path,
    scratch_dir: &Path,
    settings: &OcrSettings,
) -> Result<String, ExtractionError> {
    let workdir = tempfile::Builder::new()
        .prefix("resume-ocr-")
        .tempdir_in(scratch_dir)?;

    let pages = rasterize(pdf, workdir.path(), settings).await?;
    if pages.is_empty() {
        return Err(ExtractionError::NoPages);
    }
    debug!("Rendered {} page(s) to {}", pages.len(), workdir.path().display());

    let mut text = String::new();
    for (index, image) in pages.iter().enumerate() {
        let page_text = recognize(image, index + 1, settings).await?;
        text.push_str(page_text.trim_end());
        text.push('\n');
    }

    info!(
        "OCR extracted {} characters from {} page(s)",
        text.chars().count(),
        pages.len()
    );
    Ok(text)
}

/// Renders every page of `pdf` into `out_dir`, returning image paths in page order.
async fn rasterize(
    pdf: &Path,
    out_dir: &Path,
    settings: &OcrSettings,
) -> Result<Vec<PathBuf>, ExtractionError> {
    let output = Command::new(&settings.pdftoppm_bin)
        .arg("-png")
        .arg("-r")
        .arg(settings.dpi.to_string())
        .arg(pdf)
        .arg(out_dir.join(PAGE_PREFIX))
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| {
            ExtractionError::Rasterize(format!("failed to run {}: {e}", settings.pdftoppm_bin))
        })?;

    if !output.status.success() {
        return Err(ExtractionError::Rasterize(failure_message(&output)));
    }

    let mut pages: Vec<(u32, PathBuf)> = std::fs::read_dir(out_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter_map(|path| page_number(&path).map(|n| (n, path)))
        .collect();
    pages.sort_by_key(|(n, _)| *n);

    Ok(pages.into_iter().map(|(_, path)| path).collect())
}

async fn recognize(
    image: &Path,
    page: usize,
    settings: &OcrSettings,
) -> Result<String, ExtractionError> {
    let run = Command::new(&settings.tesseract_bin)
        .arg(image)
        .arg("stdout")
        .arg("-l")
        .arg(&settings.language)
        .kill_on_drop(true)
        .output();

    let output = tokio::time::timeout(settings.page_timeout, run)
        .await
        .map_err(|_| ExtractionError::OcrTimeout { page })?
        .map_err(|e| ExtractionError::Recognition {
            page,
            message: format!("failed to run {}: {e}", settings.tesseract_bin),
        })?;

    if !output.status.success() {
        return Err(ExtractionError::Recognition {
            page,
            message: failure_message(&output),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// `page-7.png` / `page-07.png` → 7. Anything else → None.
fn page_number(path: &Path) -> Option<u32> {
    if path.extension()?.to_str()? != "png" {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    let (prefix, number) = stem.rsplit_once('-')?;
    if prefix != PAGE_PREFIX {
        return None;
    }
    number.parse().ok()
}

fn failure_message(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        format!("exited with {}", output.status)
    } else {
        format!("exited with {}: {stderr}", output.status)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[test]
    fn test_page_number_parses_padded_and_unpadded() {
        assert_eq!(page_number(Path::new("/tmp/x/page-1.png")), Some(1));
        assert_eq!(page_number(Path::new("/tmp/x/page-07.png")), Some(7));
        assert_eq!(page_number(Path::new("/tmp/x/page-012.png")), Some(12));
    }

    #[test]
    fn test_page_number_rejects_other_files() {
        assert_eq!(page_number(Path::new("/tmp/x/page-1.ppm")), None);
        assert_eq!(page_number(Path::new("/tmp/x/cover-1.png")), None);
        assert_eq!(page_number(Path::new("/tmp/x/page-one.png")), None);
        assert_eq!(page_number(Path::new("/tmp/x/page.png")), None);
    }

    // Executing a freshly written script while another test forks can fail with
    // ETXTBSY; tests that spawn tools hold this lock.
    pub(crate) static TOOLS_LOCK: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());

    fn is_empty_dir(dir: &Path) -> bool {
        std::fs::read_dir(dir).unwrap().next().is_none()
    }

    #[tokio::test]
    async fn test_missing_rasterizer_fails_and_cleans_up() {
        let _guard = TOOLS_LOCK.lock().await;
        let scratch = tempfile::tempdir().unwrap();
        let settings = OcrSettings {
            pdftoppm_bin: "/nonexistent/pdftoppm".into(),
            ..OcrSettings::default()
        };

        let err = ocr_pdf(Path::new("/nonexistent/in.pdf"), scratch.path(), &settings)
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Rasterize(_)));
        assert!(is_empty_dir(scratch.path()));
    }

    /// Fake `pdftoppm`/`tesseract` scripts. Unix only.
    #[cfg(unix)]
    pub(crate) mod fake_tools {
        use std::os::unix::fs::PermissionsExt;
        use std::time::Duration;

        use super::*;

        pub(crate) fn write_script(dir: &Path, name: &str, body: &str) -> String {
            let path = dir.join(name);
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path.to_string_lossy().into_owned()
        }

        /// Renders pages 1, 2, and 10; each "image" contains its own OCR text.
        const FAKE_PDFTOPPM: &str =
            r#"for i in 1 2 10; do printf 'text of page %s\n\f' "$i" > "$5-$i.png"; done"#;
        const FAKE_TESSERACT: &str = r#"cat "$1""#;

        fn settings(bin_dir: &Path, pdftoppm: &str, tesseract: &str) -> OcrSettings {
            OcrSettings {
                pdftoppm_bin: write_script(bin_dir, "pdftoppm", pdftoppm),
                tesseract_bin: write_script(bin_dir, "tesseract", tesseract),
                page_timeout: Duration::from_secs(10),
                ..OcrSettings::default()
            }
        }

        #[tokio::test]
        async fn test_pages_concatenated_in_numeric_order() {
            let _guard = TOOLS_LOCK.lock().await;
            let bin = tempfile::tempdir().unwrap();
            let scratch = tempfile::tempdir().unwrap();
            let settings = settings(bin.path(), FAKE_PDFTOPPM, FAKE_TESSERACT);

            let text = ocr_pdf(Path::new("scan.pdf"), scratch.path(), &settings)
                .await
                .unwrap();
            assert_eq!(text, "text of page 1\ntext of page 2\ntext of page 10\n");
            assert!(is_empty_dir(scratch.path()));
        }

        #[tokio::test]
        async fn test_recognition_failure_cleans_up() {
            let _guard = TOOLS_LOCK.lock().await;
            let bin = tempfile::tempdir().unwrap();
            let scratch = tempfile::tempdir().unwrap();
            let settings = settings(bin.path(), FAKE_PDFTOPPM, "echo 'bad image' >&2; exit 1");

            let err = ocr_pdf(Path::new("scan.pdf"), scratch.path(), &settings)
                .await
                .unwrap_err();
            match err {
                ExtractionError::Recognition { page, message } => {
                    assert_eq!(page, 1);
                    assert!(message.contains("bad image"));
                }
                other => panic!("unexpected error: {other}"),
            }
            assert!(is_empty_dir(scratch.path()));
        }

        #[tokio::test]
        async fn test_page_timeout() {
            let _guard = TOOLS_LOCK.lock().await;
            let bin = tempfile::tempdir().unwrap();
            let scratch = tempfile::tempdir().unwrap();
            let settings = OcrSettings {
                page_timeout: Duration::from_millis(300),
                ..settings(bin.path(), FAKE_PDFTOPPM, "exec sleep 30")
            };

            let err = ocr_pdf(Path::new("scan.pdf"), scratch.path(), &settings)
                .await
                .unwrap_err();
            assert!(matches!(err, ExtractionError::OcrTimeout { page: 1 }));
            assert!(is_empty_dir(scratch.path()));
        }

        #[tokio::test]
        async fn test_no_pages_rendered() {
            let _guard = TOOLS_LOCK.lock().await;
            let bin = tempfile::tempdir().unwrap();
            let scratch = tempfile::tempdir().unwrap();
            let settings = settings(bin.path(), "exit 0", FAKE_TESSERACT);

            let err = ocr_pdf(Path::new("scan.pdf"), scratch.path(), &settings)
                .await
                .unwrap_err();
            assert!(matches!(err, ExtractionError::NoPages));
            assert!(is_empty_dir(scratch.path()));
        }

        #[tokio::test]
        async fn test_rasterizer_failure_reports_stderr() {
            let _guard = TOOLS_LOCK.lock().await;
            let bin = tempfile::tempdir().unwrap();
            let scratch = tempfile::tempdir().unwrap();
            let settings = settings(bin.path(), "echo 'Syntax Error' >&2; exit 99", FAKE_TESSERACT);

            let err = ocr_pdf(Path::new("scan.pdf"), scratch.path(), &settings)
                .await
                .unwrap_err();
            assert!(err.to_string().contains("Syntax Error"));
            assert!(is_empty_dir(scratch.path()));
        }
    }
}
