//! Format dispatcher: map a filename suffix onto a closed set of formats.

use crate::error::ResumeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Input container formats the pipeline can extract text from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Classify by (case-sensitive) suffix. `None` for anything else.
    pub fn from_filename(filename: &str) -> Option<Self> {
        if filename.ends_with(".pdf") {
            Some(DocumentFormat::Pdf)
        } else if filename.ends_with(".docx") {
            Some(DocumentFormat::Docx)
        } else {
            None
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Select the extractor for an already-validated filename.
pub fn dispatch(filename: &str) -> Result<DocumentFormat, ResumeError> {
    DocumentFormat::from_filename(filename).ok_or_else(|| ResumeError::UnsupportedFormat {
        filename: filename.to_string(),
    })
}
