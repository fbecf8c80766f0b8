//! Input resolution: turn a user-supplied path or URL into a document.
//!
//! The pipeline itself only ever sees bytes and a filename. This module is
//! the acquisition step in front of it: read a local file, or download a URL
//! with a timeout. Size and type are *not* checked here; the validator does
//! that, so an oversized download is rejected the same way an oversized
//! upload is.

use crate::error::ResumeError;
use crate::output::SubmittedDocument;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;
use tracing::{debug, info};

/// Filename used when a URL provides none.
pub const FALLBACK_FILENAME: &str = "download";

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Resolve the input string to a document with a fresh request id.
pub async fn resolve_input(
    input: &str,
    timeout_secs: u64,
) -> Result<SubmittedDocument, ResumeError> {
    if is_url(input) {
        download_url(input, timeout_secs).await
    } else {
        read_local(input).await
    }
}

/// Read a local file; the filename is its last path component.
async fn read_local(path_str: &str) -> Result<SubmittedDocument, ResumeError> {
    if path_str.is_empty() {
        return Err(ResumeError::InvalidInput {
            input: path_str.to_string(),
        });
    }
    let path = PathBuf::from(path_str);

    let content = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ResumeError::FileNotFound { path });
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(ResumeError::PermissionDenied { path });
        }
        Err(e) => {
            return Err(ResumeError::InvalidInput {
                input: format!("{path_str} ({e})"),
            });
        }
    };

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    debug!("Read local file: {} ({} bytes)", path.display(), content.len());
    Ok(SubmittedDocument::new(filename, content))
}

/// Download a URL into memory.
async fn download_url(url: &str, timeout_secs: u64) -> Result<SubmittedDocument, ResumeError> {
    info!("Downloading resume from: {}", url);

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| ResumeError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            ResumeError::DownloadTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            ResumeError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    })?;

    if !response.status().is_success() {
        return Err(ResumeError::DownloadFailed {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    let disposition = response
        .headers()
        .get(reqwest::header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let filename = extract_filename(url, disposition.as_deref());

    let bytes = response.bytes().await.map_err(|e| {
        if e.is_timeout() {
            ResumeError::DownloadTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            ResumeError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    })?;

    info!("Downloaded '{}' ({} bytes)", filename, bytes.len());
    Ok(SubmittedDocument::new(filename, bytes))
}

static RE_DISPOSITION_FILENAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)filename\s*=\s*"?([^";]+)"?"#).unwrap());

/// Pick a filename from `Content-Disposition`, else the last URL path
/// segment, else [`FALLBACK_FILENAME`].
///
/// The RFC 5987 `filename*=` form is not decoded; servers that send it
/// almost always send a plain `filename=` as well.
pub fn extract_filename(url: &str, content_disposition: Option<&str>) -> String {
    if let Some(caps) = content_disposition.and_then(|h| RE_DISPOSITION_FILENAME.captures(h)) {
        let name = caps[1].trim();
        // Never trust a path from the server.
        let name = name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(name);
        if !name.is_empty() {
            return name.to_string();
        }
    }

    if let Ok(parsed) = reqwest::Url::parse(url) {
        if let Some(mut segments) = parsed.path_segments() {
            if let Some(last) = segments.next_back() {
                if !last.is_empty() && last.contains('.') {
                    return last.to_string();
                }
            }
        }
    }

    FALLBACK_FILENAME.to_string()
}
