//! Shared helpers for the integration tests.

#![allow(dead_code)]

use pdftext::{ExtractOptions, PdfiumExtractor};
use std::path::PathBuf;

/// Skip this test unless the pdfium shared library can be bound.
///
/// Honours `PDFIUM_LIB_PATH` the same way the binaries do.
macro_rules! skip_unless_pdfium {
    () => {{
        let extractor = common::pdfium_extractor();
        if let Err(e) = extractor.check_binding() {
            println!("SKIP: pdfium not available ({e})");
            println!("      Set PDFIUM_LIB_PATH or install libpdfium to run this test");
            return;
        }
        extractor
    }};
}
pub(crate) use skip_unless_pdfium;

pub fn pdfium_extractor() -> PdfiumExtractor {
    PdfiumExtractor::new(ExtractOptions {
        password: None,
        library_dir: std::env::var_os("PDFIUM_LIB_PATH").map(PathBuf::from),
    })
}

/// Build a small PDF with one Helvetica line per page.
///
/// Page text must be plain ASCII without parentheses or backslashes.
pub fn text_pdf(pages: &[&str]) -> Vec<u8> {
    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            (0..pages.len())
                .map(|i| format!("{} 0 R", 4 + 2 * i))
                .collect::<Vec<_>>()
                .join(" "),
            pages.len()
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ];

    for (i, text) in pages.iter().enumerate() {
        let content = format!("BT /F1 24 Tf 72 720 Td ({text}) Tj ET");
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
            5 + 2 * i
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{content}\nendstream",
            content.len()
        ));
    }

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.push_str(&format!("{} 0 obj\n{body}\nendobj\n", i + 1));
    }

    let xref = out.len();
    out.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
    for offset in offsets {
        out.push_str(&format!("{offset:010} 00000 n \n"));
    }
    out.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref}\n%%EOF\n",
        objects.len() + 1
    ));
    out.into_bytes()
}
