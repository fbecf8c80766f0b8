//! Configuration types for resume analysis.
//!
//! All tunable behaviour lives in [`PipelineConfig`], built via its
//! [`PipelineConfigBuilder`]. Defaults: 10 MiB uploads, a 4000-character
//! preview, at most five skills.
//!
//! The skill vocabulary is not configurable; it is a `const` table in
//! [`crate::pipeline::postprocess`].

use crate::error::ResumeError;
use crate::progress::ProgressCallback;
use std::fmt;

/// Largest accepted upload, in bytes (10 MiB).
pub const DEFAULT_MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Characters of extracted text kept in the summary before `...` is added.
pub const DEFAULT_PREVIEW_CHARS: usize = 4000;

/// Maximum number of skills reported per document.
pub const DEFAULT_MAX_SKILLS: usize = 5;

/// Documents analysed at once in batch mode.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Download timeout for URL inputs, in seconds.
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 60;

/// Configuration for the resume pipeline.
///
/// # Example
/// ```rust
/// use resume_pipeline::PipelineConfig;
///
/// let config = PipelineConfig::builder()
///     .preview_chars(2000)
///     .concurrency(8)
///     .build()
///     .unwrap();
/// assert_eq!(config.max_skills, 5);
/// ```
#[derive(Clone)]
pub struct PipelineConfig {
    /// Upper bound on `content.len()`. Default: 10 MiB.
    pub max_file_size: usize,

    /// Characters of text kept in the preview. Default: 4000.
    ///
    /// Skill detection always runs on the full text; only the returned
    /// `text` field is shortened.
    pub preview_chars: usize,

    /// Maximum skills reported. Default: 5.
    pub max_skills: usize,

    /// Documents analysed at once in batch mode. Default: 4.
    pub concurrency: usize,

    /// Download timeout for URL inputs in seconds. Default: 60.
    pub download_timeout_secs: u64,

    /// Optional stage observer.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            preview_chars: DEFAULT_PREVIEW_CHARS,
            max_skills: DEFAULT_MAX_SKILLS,
            concurrency: DEFAULT_CONCURRENCY,
            download_timeout_secs: DEFAULT_DOWNLOAD_TIMEOUT_SECS,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("max_file_size", &self.max_file_size)
            .field("preview_chars", &self.preview_chars)
            .field("max_skills", &self.max_skills)
            .field("concurrency", &self.concurrency)
            .field("download_timeout_secs", &self.download_timeout_secs)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn PipelineProgressCallback>"),
            )
            .finish()
    }
}

impl PipelineConfig {
    /// Create a new builder for `PipelineConfig`.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`PipelineConfig`].
#[derive(Debug)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    pub fn max_file_size(mut self, bytes: usize) -> Self {
        self.config.max_file_size = bytes;
        self
    }

    pub fn preview_chars(mut self, n: usize) -> Self {
        self.config.preview_chars = n;
        self
    }

    pub fn max_skills(mut self, n: usize) -> Self {
        self.config.max_skills = n;
        self
    }

    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = n.max(1);
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<PipelineConfig, ResumeError> {
        let c = &self.config;
        if c.max_file_size == 0 {
            return Err(ResumeError::InvalidConfig(
                "max file size must be ≥ 1 byte".into(),
            ));
        }
        if c.preview_chars == 0 {
            return Err(ResumeError::InvalidConfig(
                "preview length must be ≥ 1 character".into(),
            ));
        }
        if c.download_timeout_secs == 0 {
            return Err(ResumeError::InvalidConfig(
                "download timeout must be ≥ 1 second".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_limits() {
        let c = PipelineConfig::default();
        assert_eq!(c.max_file_size, 10_485_760);
        assert_eq!(c.preview_chars, 4000);
        assert_eq!(c.max_skills, 5);
        assert_eq!(c.concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(c.concurrency, 4);
        assert_eq!(c.download_timeout_secs, DEFAULT_DOWNLOAD_TIMEOUT_SECS);
        assert_eq!(c.download_timeout_secs, 60);
        assert!(c.progress_callback.is_none());
    }

    #[test]
    fn builder_clamps_concurrency() {
        let c = PipelineConfig::builder().concurrency(0).build().unwrap();
        assert_eq!(c.concurrency, 1);
    }

    #[test]
    fn builder_rejects_zero_limits() {
        assert!(matches!(
            PipelineConfig::builder().max_file_size(0).build(),
            Err(ResumeError::InvalidConfig(_))
        ));
        assert!(matches!(
            PipelineConfig::builder().preview_chars(0).build(),
            Err(ResumeError::InvalidConfig(_))
        ));
        assert!(matches!(
            PipelineConfig::builder().download_timeout_secs(0).build(),
            Err(ResumeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn zero_max_skills_is_allowed() {
        let c = PipelineConfig::builder().max_skills(0).build().unwrap();
        assert_eq!(c.max_skills, 0);
    }

    #[test]
    fn debug_hides_callback() {
        let c = PipelineConfig::builder()
            .progress_callback(std::sync::Arc::new(crate::progress::NoopProgressCallback))
            .build()
            .unwrap();
        let dbg = format!("{c:?}");
        assert!(dbg.contains("<dyn PipelineProgressCallback>"));
    }
}
