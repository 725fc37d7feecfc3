//! Command-line core shared by the `pdftext` binary and its tests.
//!
//! The binary only parses flags and builds the extractor; everything that
//! decides what lands on stdout and which exit code to return lives here so
//! it can run against a [`crate::mock::MockExtractor`].

use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::extractor::TextExtractor;

/// Usage line printed when no path is given.
pub const USAGE: &str = "Usage: pdftext <filename>";

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

/// Run one extraction and report the outcome on `out`.
///
/// - no path → usage line, exit 1
/// - success → extracted text plus a newline, exit 0
/// - failure → `Error: <message>`, exit 1
pub fn run<W: Write>(
    input: Option<&Path>,
    extractor: &dyn TextExtractor,
    out: &mut W,
) -> u8 {
    let Some(path) = input else {
        // Nothing useful to do if stdout is gone.
        let _ = writeln!(out, "{USAGE}");
        return EXIT_FAILURE;
    };

    debug!("Extracting text from {}", path.display());

    let written = match extractor.extract(path) {
        Ok(text) => writeln!(out, "{text}").map(|_| EXIT_SUCCESS),
        Err(e) => writeln!(out, "Error: {e}").map(|_| EXIT_FAILURE),
    };

    written.unwrap_or(EXIT_FAILURE)
}
