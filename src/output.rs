//! Data carried into and out of the pipeline.
//!
//! [`SubmittedDocument`] is the caller-owned input; [`ResumeSummary`] is the
//! record returned on success. [`ExtractionResult`] is the hand-off between
//! an extractor and the post-processor and never leaves the crate's public
//! stage functions in any other form.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque correlation token attached to every log line of one request.
///
/// The pipeline never interprets it. Generated ids are the first eight hex
/// characters of a random UUID, short enough to read in a log line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random id.
    pub fn generate() -> Self {
        let mut id = uuid::Uuid::new_v4().simple().to_string();
        id.truncate(8);
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A document submitted for analysis.
///
/// `content` is reference-counted so the pipeline can hand it to a blocking
/// worker without copying the upload.
#[derive(Debug, Clone)]
pub struct SubmittedDocument {
    pub filename: String,
    pub content: Bytes,
    pub request_id: RequestId,
}

impl SubmittedDocument {
    /// Wrap raw bytes with a freshly generated request id.
    pub fn new(filename: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
            request_id: RequestId::generate(),
        }
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = request_id;
        self
    }
}

/// Format-specific metadata attached to the result.
///
/// Serialised with an internal `type` tag: `{"type":"pdf","pages":2}` or
/// `{"type":"docx"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FileInfo {
    Pdf {
        #[serde(rename = "pages")]
        page_count: usize,
    },
    Docx,
}

/// Raw output of one extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub raw_text: String,
    pub file_info: FileInfo,
}

/// The structured summary returned for one document.
///
/// `text_length` always equals the character count of `text`, i.e. it
/// includes the trailing `...` when the preview was truncated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeSummary {
    pub text: String,
    pub text_length: usize,
    pub skills: Vec<String>,
    pub file_info: FileInfo,
    pub filename: String,
    pub file_size: u64,
}
