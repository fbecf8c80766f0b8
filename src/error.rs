//! Error types for the resume-pipeline library.
//!
//! Two types reflect the two ways a request can end badly:
//!
//! * [`InvalidReason`] — the input was rejected by the validator before any
//!   parsing happened. Always fixable by the caller: rename the file, send
//!   a non-empty one, or send a smaller one.
//!
//! * [`ResumeError`] — the fatal error returned from every entry point. It
//!   wraps an [`InvalidReason`] for validation failures and adds the
//!   extraction and acquisition failures.
//!
//! Collaborators (HTTP handlers, chat bots, the bundled CLI) decide how to
//! surface these. [`ResumeError::is_client_error`] answers the one question
//! they all need: is this the caller's fault (400-class) or ours (500-class)?

use crate::pipeline::dispatch::DocumentFormat;
use std::path::PathBuf;
use thiserror::Error;

/// Why the validator rejected a submission.
///
/// The `Display` strings are stable and meant to be shown to end users.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidReason {
    #[error("empty filename")]
    EmptyFilename,

    /// Filename does not end in `.pdf` or `.docx` (case-sensitive).
    #[error("unsupported type: only .pdf and .docx files are accepted")]
    UnsupportedType,

    #[error("empty file")]
    EmptyFile,

    #[error("file too large: {size} bytes (maximum {limit} bytes)")]
    FileTooLarge { size: usize, limit: usize },
}

/// All fatal errors returned by the resume-pipeline library.
#[derive(Debug, Error)]
pub enum ResumeError {
    // ── Validation ────────────────────────────────────────────────────────
    /// The submission failed validation; no extractor was invoked.
    #[error("{0}")]
    Validation(#[from] InvalidReason),

    /// The dispatcher was reached with a filename it cannot route.
    ///
    /// Unreachable through [`crate::pipeline::process`] because the validator
    /// rejects the same filenames first, but the dispatcher re-checks.
    #[error("unsupported format: '{filename}'")]
    UnsupportedFormat { filename: String },

    // ── Extraction ────────────────────────────────────────────────────────
    /// The document content could not be parsed by the chosen extractor.
    #[error("invalid {format}: {detail}")]
    Extraction {
        format: DocumentFormat,
        detail: String,
    },

    // ── Input acquisition ─────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("file not found: '{path}'")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("permission denied reading '{path}'")]
    PermissionDenied { path: PathBuf },

    /// The input string is neither a readable path nor an HTTP/HTTPS URL.
    #[error("invalid input '{input}': not a file path or a valid HTTP/HTTPS URL")]
    InvalidInput { input: String },

    /// HTTP URL was syntactically valid but download failed.
    #[error("failed to download '{url}': {reason}")]
    DownloadFailed { url: String, reason: String },

    /// Download exceeded the configured timeout.
    #[error("download timed out after {secs}s for '{url}'")]
    DownloadTimeout { url: String, secs: u64 },

    // ── Config ────────────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Any other failure during extraction or finalisation. The underlying
    /// error detail is kept in the message.
    #[error("processing failed: {0}")]
    Unexpected(String),
}

impl ResumeError {
    /// `true` when the caller can fix the problem by changing the input.
    ///
    /// Validation, format and acquisition errors are client errors;
    /// extraction and unexpected failures are processing errors.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ResumeError::Validation(_)
                | ResumeError::UnsupportedFormat { .. }
                | ResumeError::FileNotFound { .. }
                | ResumeError::PermissionDenied { .. }
                | ResumeError::InvalidInput { .. }
                | ResumeError::InvalidConfig(_)
        )
    }

    /// The validation reason, if this is a validation failure.
    pub fn invalid_reason(&self) -> Option<&InvalidReason> {
        match self {
            ResumeError::Validation(reason) => Some(reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display_is_the_bare_reason() {
        let e = ResumeError::from(InvalidReason::EmptyFile);
        assert_eq!(e.to_string(), "empty file");
        assert_eq!(
            ResumeError::from(InvalidReason::EmptyFilename).to_string(),
            "empty filename"
        );
    }

    #[test]
    fn unsupported_type_mentions_reason() {
        let msg = InvalidReason::UnsupportedType.to_string();
        assert!(msg.starts_with("unsupported type"), "got: {msg}");
    }

    #[test]
    fn file_too_large_display() {
        let e = InvalidReason::FileTooLarge {
            size: 11_000_000,
            limit: 10_485_760,
        };
        let msg = e.to_string();
        assert!(msg.starts_with("file too large"), "got: {msg}");
        assert!(msg.contains("10485760"));
    }

    #[test]
    fn extraction_display_names_format() {
        let e = ResumeError::Extraction {
            format: DocumentFormat::Pdf,
            detail: "missing %PDF header".into(),
        };
        assert!(e.to_string().starts_with("invalid pdf"), "got: {e}");
    }

    #[test]
    fn client_error_classification() {
        assert!(ResumeError::from(InvalidReason::EmptyFile).is_client_error());
        assert!(ResumeError::UnsupportedFormat {
            filename: "cv.txt".into()
        }
        .is_client_error());
        assert!(!ResumeError::Extraction {
            format: DocumentFormat::Docx,
            detail: "bad xml".into()
        }
        .is_client_error());
        assert!(!ResumeError::Unexpected("boom".into()).is_client_error());
        assert!(!ResumeError::DownloadTimeout {
            url: "https://example.com/cv.pdf".into(),
            secs: 5
        }
        .is_client_error());
    }

    #[test]
    fn invalid_reason_accessor() {
        let e = ResumeError::from(InvalidReason::EmptyFilename);
        assert_eq!(e.invalid_reason(), Some(&InvalidReason::EmptyFilename));
        assert_eq!(ResumeError::Unexpected("x".into()).invalid_reason(), None);
    }
}
