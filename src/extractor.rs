//! The text-extraction capability and its pdfium-backed implementation.
//!
//! Everything that understands PDF internals lives behind the
//! [`TextExtractor`] trait. The HTTP service and the CLI only ever hold a
//! `dyn TextExtractor`, so tests can swap in [`crate::mock::MockExtractor`]
//! and never need the pdfium shared library.
//!
//! ## Why validate before calling pdfium?
//!
//! pdfium reports a missing file, a permissions problem and a text file
//! renamed to `.pdf` all as the same opaque load failure. Checking
//! existence, readability and the `%PDF` magic bytes first lets callers see
//! which of those actually happened.

use crate::config::ExtractOptions;
use crate::error::ExtractError;
use pdfium_render::prelude::*;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Page delimiter appended after each page's text.
pub const PAGE_BREAK: char = '\x0c';

/// Produce plain text from a PDF on disk.
///
/// Implementations are called from blocking worker threads and must be
/// shareable across them.
pub trait TextExtractor: Send + Sync {
    /// Extract all text from the document at `path`.
    fn extract(&self, path: &Path) -> Result<String, ExtractError>;
}

/// [`TextExtractor`] backed by the pdfium engine.
///
/// pdfium is bound on every call, as the binding is cheap next to loading a
/// document and it keeps the extractor free of engine state.
#[derive(Debug, Clone, Default)]
pub struct PdfiumExtractor {
    options: ExtractOptions,
}

impl PdfiumExtractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Bind pdfium once to fail fast at startup when the library is missing.
    pub fn check_binding(&self) -> Result<(), ExtractError> {
        bind_pdfium(self.options.library_dir.as_deref()).map(|_| ())
    }
}

impl TextExtractor for PdfiumExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        validate_pdf_file(path)?;

        let pdfium = bind_pdfium(self.options.library_dir.as_deref())?;
        let password = self.options.password.as_deref();

        let document = pdfium
            .load_pdf_from_file(path, password)
            .map_err(|e| load_error(path, password.is_some(), e))?;

        let pages = document.pages();
        info!("PDF loaded: {} pages", pages.len());

        let mut text = String::new();
        for (idx, page) in pages.iter().enumerate() {
            let page_text = page.text().map_err(|e| ExtractError::PageText {
                page: idx + 1,
                detail: format!("{:?}", e),
            })?;
            let content = page_text.all();
            debug!("Page {} → {} chars", idx + 1, content.chars().count());
            text.push_str(&content);
            text.push(PAGE_BREAK);
        }

        Ok(text)
    }
}

/// Check that `path` exists, is readable, and starts with the PDF magic.
///
/// Files shorter than four bytes are passed through; pdfium reports those
/// as corrupt.
pub fn validate_pdf_file(path: &Path) -> Result<(), ExtractError> {
    let path_buf = path.to_path_buf();

    if !path.exists() {
        return Err(ExtractError::FileNotFound { path: path_buf });
    }

    match std::fs::File::open(path) {
        Ok(mut f) => {
            let mut magic = [0u8; 4];
            if f.read_exact(&mut magic).is_ok() && &magic != b"%PDF" {
                return Err(ExtractError::NotAPdf {
                    path: path_buf,
                    magic,
                });
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(ExtractError::PermissionDenied { path: path_buf });
        }
        Err(_) => {
            return Err(ExtractError::FileNotFound { path: path_buf });
        }
    }

    debug!("Validated PDF input: {}", path.display());
    Ok(())
}

/// Bind to pdfium: explicit directory, then working directory, then system.
fn bind_pdfium(library_dir: Option<&Path>) -> Result<Pdfium, ExtractError> {
    let explicit: Option<PathBuf> =
        library_dir.map(|dir| Pdfium::pdfium_platform_library_name_at_path(&dir));

    let bindings = match explicit {
        Some(lib) => Pdfium::bind_to_library(lib),
        None => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library()),
    }
    .map_err(|e| ExtractError::PdfiumBindingFailed(format!("{:?}", e)))?;

    Ok(Pdfium::new(bindings))
}

fn load_error(path: &Path, had_password: bool, e: PdfiumError) -> ExtractError {
    let err_str = format!("{:?}", e);
    if err_str.contains("Password") || err_str.contains("password") {
        if had_password {
            ExtractError::WrongPassword {
                path: path.to_path_buf(),
            }
        } else {
            ExtractError::PasswordRequired {
                path: path.to_path_buf(),
            }
        }
    } else {
        ExtractError::CorruptPdf {
            path: path.to_path_buf(),
            detail: err_str,
        }
    }
}
