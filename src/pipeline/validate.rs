//! Validator: reject bad submissions before any parser sees them.
//!
//! Checks run in a fixed order and stop at the first failure, so a 0-byte
//! `resume.txt` reports the unsupported type, not the empty file.

use crate::config::DEFAULT_MAX_FILE_SIZE;
use crate::error::InvalidReason;

/// File suffixes the pipeline accepts. Matching is case-sensitive.
pub const ACCEPTED_SUFFIXES: [&str; 2] = [".pdf", ".docx"];

/// `Ok(())` for a valid submission, `Err(reason)` otherwise.
pub type ValidationOutcome = Result<(), InvalidReason>;

/// Validate against the default 10 MiB limit.
pub fn validate(content: &[u8], filename: &str) -> ValidationOutcome {
    validate_with_limit(content, filename, DEFAULT_MAX_FILE_SIZE)
}

/// Validate against a caller-chosen size limit (inclusive).
pub fn validate_with_limit(content: &[u8], filename: &str, max_size: usize) -> ValidationOutcome {
    if filename.is_empty() {
        return Err(InvalidReason::EmptyFilename);
    }
    if !ACCEPTED_SUFFIXES.iter().any(|s| filename.ends_with(s)) {
        return Err(InvalidReason::UnsupportedType);
    }
    if content.is_empty() {
        return Err(InvalidReason::EmptyFile);
    }
    if content.len() > max_size {
        return Err(InvalidReason::FileTooLarge {
            size: content.len(),
            limit: max_size,
        });
    }
    Ok(())
}
