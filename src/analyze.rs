//! Entry points for analysing a single document.
//!
//! Extraction is CPU-bound and the PDF parser is synchronous, so the async
//! entry points run [`crate::pipeline::process`] on tokio's blocking pool.
//! Each request gets its own `tracing` span carrying the request id and
//! filename; every event the stages emit is tagged with them.

use crate::config::PipelineConfig;
use crate::error::ResumeError;
use crate::output::{ResumeSummary, SubmittedDocument};
use crate::pipeline::{self, input};
use std::time::Instant;
use tracing::{error, info, info_span};

/// Analyse a document already held in memory.
///
/// # Errors
/// * [`ResumeError::Validation`]: rejected before extraction
/// * [`ResumeError::Extraction`]: the PDF or DOCX body could not be parsed
/// * [`ResumeError::Unexpected`]: anything else, including a panic in the
///   blocking worker
pub async fn analyze(
    doc: &SubmittedDocument,
    config: &PipelineConfig,
) -> Result<ResumeSummary, ResumeError> {
    let start = Instant::now();
    let span = info_span!("resume", request_id = %doc.request_id, filename = %doc.filename);
    span.in_scope(|| info!("Upload received"));

    let task_doc = doc.clone();
    let task_config = config.clone();
    let task_span = span.clone();
    let result = tokio::task::spawn_blocking(move || {
        task_span.in_scope(|| pipeline::process(&task_doc, &task_config))
    })
    .await
    .unwrap_or_else(|e| {
        let err = ResumeError::Unexpected(format!("analysis task failed: {e}"));
        if let Some(ref cb) = config.progress_callback {
            cb.on_failed(&doc.request_id, &err.to_string());
        }
        Err(err)
    });

    span.in_scope(|| match &result {
        Ok(summary) => info!(
            "Request completed in {}ms: {} skills",
            start.elapsed().as_millis(),
            summary.skills.len()
        ),
        Err(e) if e.is_client_error() => info!("Request rejected: {}", e),
        Err(e) => error!("Processing error: {}", e),
    });

    result
}

/// Analyse a document on the current thread.
///
/// For callers without a tokio runtime. No span is created; wrap the call
/// in one if request-scoped logging is wanted.
pub fn analyze_blocking(
    doc: &SubmittedDocument,
    config: &PipelineConfig,
) -> Result<ResumeSummary, ResumeError> {
    pipeline::process(doc, config)
}

/// Resolve a local path or HTTP(S) URL, then analyse it.
///
/// # Example
/// ```rust,no_run
/// use resume_pipeline::{analyze_input, PipelineConfig};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let summary = analyze_input("resume.pdf", &PipelineConfig::default()).await?;
/// println!("{:?}", summary.skills);
/// # Ok(())
/// # }
/// ```
pub async fn analyze_input(
    input_str: impl AsRef<str>,
    config: &PipelineConfig,
) -> Result<ResumeSummary, ResumeError> {
    let doc = input::resolve_input(input_str.as_ref(), config.download_timeout_secs).await?;
    analyze(&doc, config).await
}
