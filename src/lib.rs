//! # pdftext
//!
//! Extract plain text from PDF documents, as a library, an HTTP service, or
//! a command-line tool.
//!
//! All PDF understanding is delegated to pdfium through the
//! [`TextExtractor`] trait. This crate supplies the surfaces around it:
//!
//! ```text
//!              ┌── HTTP  POST /extract-pdf ── transient file ──┐
//! PDF bytes ───┤                                               ├──▶ TextExtractor ──▶ text
//!              └── CLI   pdftext <file> ── path in place ──────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdftext::{ExtractOptions, PdfiumExtractor, TextExtractor};
//! use std::path::Path;
//!
//! let extractor = PdfiumExtractor::new(ExtractOptions::default());
//! let text = extractor.extract(Path::new("document.pdf"))?;
//! println!("{text}");
//! # Ok::<(), pdftext::ExtractError>(())
//! ```
//!
//! ## Serving
//!
//! ```rust,no_run
//! use pdftext::{serve, PdfiumExtractor, ServerConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let config = ServerConfig::default(); // 127.0.0.1:5001
//!     serve(config, Arc::new(PdfiumExtractor::default()), std::future::pending()).await
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdftext` and `pdftext-server` binaries (clap + anyhow + tracing-subscriber) |
//!
//! ## Runtime requirement
//!
//! pdfium is loaded dynamically. Point `PDFIUM_LIB_PATH` (or
//! [`ExtractOptions::library_dir`]) at the directory holding `libpdfium`,
//! drop the library next to the binary, or install it system-wide.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod mock;
pub mod server;
pub mod transient;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ExtractOptions, ServerConfig, ServerConfigBuilder};
pub use error::{ErrorKind, ExtractError};
pub use extractor::{PdfiumExtractor, TextExtractor};
pub use server::{router, serve, AppState, ErrorResponse, ExtractResponse};
pub use transient::TransientUpload;
