//! PDF extractor: per-page text via `pdf-extract`, joined in page order.
//!
//! `pdf-extract` works from an in-memory buffer, so no temp file is staged.
//! It is pure Rust but panics on some malformed inputs; the call is wrapped
//! in `catch_unwind` and a panic is reported like any other parse failure.
//! All pages are read or the whole document fails.

use crate::error::ResumeError;
use crate::output::{ExtractionResult, FileInfo};
use crate::pipeline::dispatch::DocumentFormat;
use std::panic;
use tracing::debug;

const PDF_MAGIC: &[u8] = b"%PDF";

/// Separator placed between the text of consecutive pages.
pub const PAGE_SEPARATOR: &str = "\n";

/// Extract the text of every page.
pub fn extract_pdf(content: &[u8]) -> Result<ExtractionResult, ResumeError> {
    // The header may be preceded by junk, but real-world files start with it
    // and checking first gives a clearer error than the parser does.
    if !content.starts_with(PDF_MAGIC) {
        let head = &content[..content.len().min(4)];
        return Err(invalid_pdf(format!(
            "missing %PDF header (first bytes: {:?})",
            head
        )));
    }

    let pages = panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(content))
        .map_err(|payload| invalid_pdf(format!("parser panicked: {}", panic_message(&payload))))?
        .map_err(|e| invalid_pdf(e.to_string()))?;

    let page_count = pages.len();
    for (i, page) in pages.iter().enumerate() {
        debug!("Page {} → {} chars", i + 1, page.chars().count());
    }

    Ok(ExtractionResult {
        raw_text: pages.join(PAGE_SEPARATOR),
        file_info: FileInfo::Pdf { page_count },
    })
}

fn invalid_pdf(detail: String) -> ResumeError {
    ResumeError::Extraction {
        format: DocumentFormat::Pdf,
        detail,
    }
}

fn panic_message(payload: &Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
