//! Request-scoped storage for the uploaded resume.
//!
//! The upload is written to a uniquely named `NamedTempFile`, which deletes
//! itself on drop. That covers success, extraction failure, and a dropped
//! (cancelled) request future alike.

use std::path::Path;

use axum::extract::Multipart;
use bytes::Bytes;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::extraction::DocumentKind;

/// Multipart field carrying the resume file.
pub const RESUME_FIELD: &str = "resume";

#[derive(Debug)]
pub struct StoredUpload {
    pub filename: String,
    pub kind: DocumentKind,
    file: NamedTempFile,
}

impl StoredUpload {
    pub async fn store(
        filename: String,
        kind: DocumentKind,
        bytes: Bytes,
        dir: &Path,
    ) -> Result<Self, AppError> {
        let file = tempfile::Builder::new()
            .prefix("resume-")
            .suffix(&format!(".{}", kind.extension()))
            .tempfile_in(dir)?;
        tokio::fs::write(file.path(), &bytes).await?;

        debug!(
            "Stored upload '{}' ({} bytes) at {}",
            filename,
            bytes.len(),
            file.path().display()
        );
        Ok(Self {
            filename,
            kind,
            file,
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Deletes the stored file now, logging rather than failing if removal errors.
    pub fn discard(self) {
        let path = self.file.path().to_path_buf();
        match self.file.close() {
            Ok(()) => debug!("Removed upload {}", path.display()),
            Err(e) => warn!("Failed to remove upload {}: {e}", path.display()),
        }
    }
}

/// Reads the first `resume` file field from the form and stores it.
///
/// Other fields are skipped. The extension is checked before any bytes hit disk.
pub async fn receive_upload(
    multipart: &mut Multipart,
    dir: &Path,
) -> Result<StoredUpload, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_string) else {
            return Err(AppError::NoFileProvided);
        };
        let kind = DocumentKind::from_filename(&filename)?;
        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            return Err(AppError::NoFileProvided);
        }
        return StoredUpload::store(filename, kind, bytes, dir).await;
    }
    Err(AppError::NoFileProvided)
}
