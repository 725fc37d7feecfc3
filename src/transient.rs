//! Transient storage for uploaded files.
//!
//! An upload lives on disk only while the extractor reads it. The file is
//! owned by a [`tempfile::NamedTempFile`], so it is removed when the
//! [`TransientUpload`] is dropped: after a successful extraction, after a
//! failed one, and when the owning task unwinds.
//!
//! The on-disk name is `<request-id>-<random>.pdf`. The client's filename is
//! kept as metadata only and never becomes part of a path, which rules out
//! traversal (`../../etc/passwd`) and collisions between concurrent uploads
//! that share a filename.

use crate::error::ExtractError;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;
use uuid::Uuid;

/// An uploaded file persisted for the duration of one request.
#[derive(Debug)]
pub struct TransientUpload {
    request_id: Uuid,
    original_name: String,
    file: NamedTempFile,
}

impl TransientUpload {
    /// Write `data` to a freshly named file inside `dir`.
    pub fn persist(
        dir: &Path,
        request_id: Uuid,
        original_name: impl Into<String>,
        data: &[u8],
    ) -> Result<Self, ExtractError> {
        let prefix = format!("{request_id}-");
        let mut file = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(".pdf")
            .tempfile_in(dir)
            .map_err(|source| ExtractError::TransientFile { source })?;

        file.write_all(data)
            .and_then(|_| file.flush())
            .map_err(|source| ExtractError::TransientFile { source })?;

        debug!(
            request_id = %request_id,
            path = %file.path().display(),
            bytes = data.len(),
            "Persisted transient upload"
        );

        Ok(Self {
            request_id,
            original_name: original_name.into(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// The filename the client sent. Untrusted; for logging only.
    pub fn original_name(&self) -> &str {
        &self.original_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_is_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let upload =
            TransientUpload::persist(dir.path(), Uuid::new_v4(), "report.pdf", b"%PDF-1.4").unwrap();
        let path = upload.path().to_path_buf();
        assert!(path.exists());
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4");

        drop(upload);
        assert!(!path.exists());
    }

    #[test]
    fn path_ignores_client_filename() {
        let dir = tempfile::tempdir().unwrap();
        let id = Uuid::new_v4();
        let upload = TransientUpload::persist(dir.path(), id, "../../etc/passwd", b"x").unwrap();

        assert_eq!(upload.path().parent(), Some(dir.path()));
        let name = upload.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(&id.to_string()), "got: {name}");
        assert!(name.ends_with(".pdf"));
        assert!(!name.contains("passwd"));
        assert_eq!(upload.original_name(), "../../etc/passwd");
        assert_eq!(upload.request_id(), id);
    }

    #[test]
    fn same_name_twice_gives_distinct_paths() {
        let dir = tempfile::tempdir().unwrap();
        let a = TransientUpload::persist(dir.path(), Uuid::new_v4(), "same.pdf", b"a").unwrap();
        let b = TransientUpload::persist(dir.path(), Uuid::new_v4(), "same.pdf", b"b").unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("missing");
        let err = TransientUpload::persist(&gone, Uuid::new_v4(), "a.pdf", b"x").unwrap_err();
        assert!(matches!(err, ExtractError::TransientFile { .. }));
        assert_eq!(err.kind(), crate::error::ErrorKind::Io);
    }
}
