//! Pipeline stages for resume analysis.
//!
//! Each submodule implements exactly one step, and [`process`] runs them in
//! strict sequence for one document:
//!
//! ```text
//! validate ──▶ dispatch ──▶ pdf | docx ──▶ postprocess
//! (limits)     (suffix)     (raw text)     (skills, preview)
//! ```
//!
//! 1. [`validate`]    — filename, type, emptiness and size checks
//! 2. [`dispatch`]    — closed `Pdf | Docx` selection from the suffix
//! 3. [`pdf`] / [`docx`] — raw text plus format metadata
//! 4. [`postprocess`] — skill scan over the full text, then preview cut
//!
//! [`input`] sits in front of the pipeline: it turns a path or URL into a
//! [`SubmittedDocument`].
//!
//! The first failing stage ends the request; nothing is retried and no
//! partial summary is produced.

pub mod dispatch;
pub mod docx;
pub mod input;
pub mod pdf;
pub mod postprocess;
pub mod validate;

use crate::config::PipelineConfig;
use crate::error::ResumeError;
use crate::output::{FileInfo, ResumeSummary, SubmittedDocument};
use crate::progress::PipelineStage;
use dispatch::DocumentFormat;
use tracing::{debug, info, warn};

/// Run the full pipeline for one document, synchronously.
///
/// Blocks for the duration of extraction. Async callers should use
/// [`crate::analyze::analyze`], which moves this onto the blocking pool.
pub fn process(
    doc: &SubmittedDocument,
    config: &PipelineConfig,
) -> Result<ResumeSummary, ResumeError> {
    let result = run_stages(doc, config);
    if let Err(ref e) = result {
        if let Some(ref cb) = config.progress_callback {
            cb.on_failed(&doc.request_id, &e.to_string());
        }
    }
    result
}

fn run_stages(
    doc: &SubmittedDocument,
    config: &PipelineConfig,
) -> Result<ResumeSummary, ResumeError> {
    let report = |stage: PipelineStage| {
        debug!(request_id = %doc.request_id, "stage: {}", stage);
        if let Some(ref cb) = config.progress_callback {
            cb.on_stage(&doc.request_id, &stage);
        }
    };

    report(PipelineStage::Received);
    info!(
        request_id = %doc.request_id,
        "Processing '{}' ({} bytes)",
        doc.filename,
        doc.content.len()
    );

    // ── Step 1: Validate ─────────────────────────────────────────────────
    if let Err(reason) =
        validate::validate_with_limit(&doc.content, &doc.filename, config.max_file_size)
    {
        warn!(request_id = %doc.request_id, "Validation failed: {}", reason);
        return Err(reason.into());
    }
    report(PipelineStage::Validated);

    // ── Step 2: Dispatch + extract ───────────────────────────────────────
    let format = dispatch::dispatch(&doc.filename)?;
    let extracted = match format {
        DocumentFormat::Pdf => pdf::extract_pdf(&doc.content),
        DocumentFormat::Docx => docx::extract_docx(&doc.content),
    }
    .inspect_err(|e| warn!(request_id = %doc.request_id, "Extraction failed: {}", e))?;

    let raw_chars = extracted.raw_text.chars().count();
    match extracted.file_info {
        FileInfo::Pdf { page_count } => info!(
            request_id = %doc.request_id,
            "PDF extracted: {} pages, {} chars",
            page_count,
            raw_chars
        ),
        FileInfo::Docx => {
            info!(request_id = %doc.request_id, "DOCX extracted: {} chars", raw_chars)
        }
    }
    report(PipelineStage::Extracted { format });

    // ── Step 3: Finalise ─────────────────────────────────────────────────
    let summary = postprocess::finalize(
        &extracted.raw_text,
        extracted.file_info,
        &doc.filename,
        doc.content.len() as u64,
        config.preview_chars,
        config.max_skills,
    );

    info!(
        request_id = %doc.request_id,
        "Skills found: {} {:?}",
        summary.skills.len(),
        summary.skills
    );
    if raw_chars > config.preview_chars {
        info!(
            request_id = %doc.request_id,
            "Text trimmed: {} → {} chars",
            raw_chars,
            summary.text_length
        );
    }
    report(PipelineStage::Finalized);

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidReason;
    use crate::progress::PipelineProgressCallback;
    use crate::output::RequestId;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl PipelineProgressCallback for Recorder {
        fn on_stage(&self, _id: &RequestId, stage: &PipelineStage) {
            self.events.lock().unwrap().push(stage.to_string());
        }

        fn on_failed(&self, _id: &RequestId, error: &str) {
            self.events.lock().unwrap().push(format!("failed: {error}"));
        }
    }

    fn config_with(rec: &Arc<Recorder>) -> PipelineConfig {
        PipelineConfig::builder()
            .progress_callback(Arc::clone(rec) as Arc<dyn PipelineProgressCallback>)
            .build()
            .unwrap()
    }

    #[test]
    fn empty_file_stops_before_extraction() {
        let rec = Arc::new(Recorder::default());
        let doc = SubmittedDocument::new("resume.pdf", Vec::new());
        let err = process(&doc, &config_with(&rec)).unwrap_err();

        assert_eq!(err.invalid_reason(), Some(&InvalidReason::EmptyFile));
        assert_eq!(
            *rec.events.lock().unwrap(),
            vec!["received".to_string(), "failed: empty file".to_string()]
        );
    }

    #[test]
    fn unsupported_type_is_validation_error() {
        let doc = SubmittedDocument::new("resume.txt", b"plain text CV".to_vec());
        let err = process(&doc, &PipelineConfig::default()).unwrap_err();
        assert_eq!(err.invalid_reason(), Some(&InvalidReason::UnsupportedType));
    }

    #[test]
    fn configured_size_limit_applies() {
        let config = PipelineConfig::builder().max_file_size(8).build().unwrap();
        let doc = SubmittedDocument::new("resume.pdf", b"%PDF-1.4 too long".to_vec());
        let err = process(&doc, &config).unwrap_err();
        assert!(matches!(
            err.invalid_reason(),
            Some(InvalidReason::FileTooLarge { limit: 8, .. })
        ));
    }

    #[test]
    fn corrupt_pdf_reports_validated_then_fails() {
        let rec = Arc::new(Recorder::default());
        let doc = SubmittedDocument::new("resume.pdf", b"not a pdf".to_vec());
        let err = process(&doc, &config_with(&rec)).unwrap_err();

        assert!(matches!(
            err,
            ResumeError::Extraction {
                format: DocumentFormat::Pdf,
                ..
            }
        ));
        let events = rec.events.lock().unwrap();
        assert_eq!(events[..2], ["received".to_string(), "validated".to_string()]);
        assert!(events[2].starts_with("failed: invalid pdf"));
        assert_eq!(events.len(), 3);
    }

    fn docx_package(body: &str) -> Vec<u8> {
        use std::io::{Cursor, Write};
        use zip::write::SimpleFileOptions;

        let xml = format!(
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        );
        let mut w = zip::ZipWriter::new(Cursor::new(Vec::new()));
        w.start_file(docx::MAIN_DOCUMENT_PART, SimpleFileOptions::default())
            .unwrap();
        w.write_all(xml.as_bytes()).unwrap();
        w.finish().unwrap().into_inner()
    }

    #[test]
    fn success_reports_every_stage_in_order() {
        let rec = Arc::new(Recorder::default());
        let doc = SubmittedDocument::new(
            "cv.docx",
            docx_package("<w:p><w:r><w:t>Django and Redis</w:t></w:r></w:p>"),
        );
        let summary = process(&doc, &config_with(&rec)).unwrap();

        assert_eq!(summary.skills, vec!["Redis", "Django"]);
        assert_eq!(
            *rec.events.lock().unwrap(),
            vec![
                "received".to_string(),
                "validated".to_string(),
                "extracted (docx)".to_string(),
                "finalized".to_string(),
            ]
        );
    }
}
