//! Error types for the pdftext library.
//!
//! Every failure the service or the CLI can report is one variant of
//! [`ExtractError`]. Variants are grouped into three coarse [`ErrorKind`]s so
//! callers (and the HTTP layer) can branch on the cause without matching on
//! message text:
//!
//! * [`ErrorKind::Validation`]: the request itself is malformed (missing
//!   upload, empty filename, unreadable multipart body).
//! * [`ErrorKind::Extraction`]: the PDF engine could not produce text
//!   (not a PDF, corrupt, encrypted, timed out, engine unavailable).
//! * [`ErrorKind::Io`]: the file system got in the way (missing input,
//!   permissions, transient file could not be written).

use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of an [`ExtractError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Extraction,
    Io,
}

/// All errors returned by the pdftext library.
#[derive(Debug, Error)]
pub enum ExtractError {
    // ── Request validation ───────────────────────────────────────────────
    /// The multipart body carried no `file` upload.
    #[error("No file part")]
    MissingFilePart,

    /// A `file` upload was present but its filename was empty.
    #[error("No selected file")]
    EmptyFilename,

    /// The request body could not be read as multipart form data.
    #[error("Malformed upload: {detail}")]
    MalformedUpload { detail: String },

    // ── Input errors ─────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{}'", path.display())]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{}'", path.display())]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{}' (first bytes: {magic:?})", path.display())]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── PDF errors ───────────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{}' is corrupt: {detail}", path.display())]
    CorruptPdf { path: PathBuf, detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF '{}' is encrypted and requires a password", path.display())]
    PasswordRequired { path: PathBuf },

    /// A password was provided but it is wrong.
    #[error("Wrong password for PDF '{}'", path.display())]
    WrongPassword { path: PathBuf },

    /// pdfium could not produce a text page for a specific page.
    #[error("Text extraction failed for page {page}: {detail}")]
    PageText { page: usize, detail: String },

    /// Extraction did not finish within the configured bound.
    #[error("Extraction timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },

    // ── Pdfium binding errors ────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\
Set PDFIUM_LIB_PATH to the directory containing libpdfium, \
or install it system-wide."
    )]
    PdfiumBindingFailed(String),

    // ── I/O errors ───────────────────────────────────────────────────────
    /// Could not create or write the transient upload file.
    #[error("Failed to write transient file: {source}")]
    TransientFile {
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ExtractError {
    /// The coarse category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtractError::MissingFilePart
            | ExtractError::EmptyFilename
            | ExtractError::MalformedUpload { .. }
            | ExtractError::InvalidConfig(_) => ErrorKind::Validation,
            ExtractError::FileNotFound { .. }
            | ExtractError::PermissionDenied { .. }
            | ExtractError::TransientFile { .. } => ErrorKind::Io,
            ExtractError::NotAPdf { .. }
            | ExtractError::CorruptPdf { .. }
            | ExtractError::PasswordRequired { .. }
            | ExtractError::WrongPassword { .. }
            | ExtractError::PageText { .. }
            | ExtractError::Timeout { .. }
            | ExtractError::PdfiumBindingFailed(_)
            | ExtractError::Internal(_) => ErrorKind::Extraction,
        }
    }

    /// True for errors caused by the caller's request rather than the server.
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}
