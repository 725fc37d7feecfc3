//! CLI binary for pdftext.
//!
//! A thin shim over the library crate: parses flags, builds a
//! `PdfiumExtractor` and hands off to `pdftext::cli::run`.

use clap::Parser;
use pdftext::{cli, ExtractOptions, PdfiumExtractor};
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Print the text of a PDF
  pdftext document.pdf

  # Encrypted document
  pdftext --password s3cret statement.pdf

  # Use a specific pdfium build
  PDFIUM_LIB_PATH=/opt/pdfium/lib pdftext document.pdf

EXIT CODES:
  0  text written to stdout
  1  no file given, or extraction failed ("Error: <message>" on stdout)
  2  unrecognised flag (reported by the argument parser on stderr)

Arguments after the first path are ignored.
"#;

/// Extract plain text from a PDF file.
#[derive(Parser, Debug)]
#[command(
    name = "pdftext",
    version,
    about = "Extract plain text from a PDF file",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path of the PDF to read.
    input: Option<PathBuf>,

    /// Further paths; accepted and ignored.
    #[arg(hide = true)]
    ignored: Vec<OsString>,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "PDFTEXT_PASSWORD")]
    password: Option<String>,

    /// Directory containing the pdfium shared library.
    #[arg(long, env = "PDFIUM_LIB_PATH")]
    pdfium_lib: Option<PathBuf>,

    /// Enable DEBUG-level tracing logs on stderr.
    #[arg(short, long, env = "PDFTEXT_VERBOSE")]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Cli::parse();

    // stdout carries the extracted text; logs go to stderr only.
    let filter = if args.verbose { "debug" } else { "error" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    if !args.ignored.is_empty() {
        debug!("Ignoring {} extra argument(s)", args.ignored.len());
    }

    let extractor = PdfiumExtractor::new(ExtractOptions {
        password: args.password,
        library_dir: args.pdfium_lib,
    });

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    ExitCode::from(cli::run(args.input.as_deref(), &extractor, &mut handle))
}
