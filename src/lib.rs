//! # resume-pipeline
//!
//! Extract the text of an uploaded resume (PDF or DOCX) and derive a small
//! structured summary from it: detected skill keywords, a bounded text
//! preview, and per-format metadata.
//!
//! ## Pipeline Overview
//!
//! ```text
//! bytes + filename
//!  │
//!  ├─ 1. Validate  non-empty name, .pdf/.docx suffix, non-empty, ≤ 10 MiB
//!  ├─ 2. Dispatch  Pdf | Docx from the suffix
//!  ├─ 3. Extract   per-page PDF text (pdf-extract) or DOCX body (zip + quick-xml)
//!  ├─ 4. Finalise  skill scan over the full text, then 4000-char preview
//!  └─ 5. Output    ResumeSummary { text, text_length, skills, file_info, … }
//! ```
//!
//! Stages run strictly in order; the first failure ends the request and no
//! partial summary is returned. Requests share nothing mutable, so any
//! number can run at once.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use resume_pipeline::{analyze, PipelineConfig, SubmittedDocument};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bytes = std::fs::read("resume.pdf")?;
//!     let doc = SubmittedDocument::new("resume.pdf", bytes);
//!     let summary = analyze(&doc, &PipelineConfig::default()).await?;
//!     println!("{} chars, skills: {:?}", summary.text_length, summary.skills);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `resume-scan` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! resume-pipeline = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod analyze;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod stream;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use analyze::{analyze, analyze_blocking, analyze_input};
pub use config::{PipelineConfig, PipelineConfigBuilder};
pub use error::{InvalidReason, ResumeError};
pub use output::{ExtractionResult, FileInfo, RequestId, ResumeSummary, SubmittedDocument};
pub use pipeline::dispatch::DocumentFormat;
pub use pipeline::postprocess::SKILL_VOCABULARY;
pub use pipeline::process;
pub use progress::{NoopProgressCallback, PipelineProgressCallback, PipelineStage, ProgressCallback};
pub use stream::{analyze_stream, AnalysisStream, BatchItem};
