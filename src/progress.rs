//! Stage observer for the per-request state machine.
//!
//! Every request moves through `Received → Validated → Extracted →
//! Finalized`, or stops in a terminal failure from any of those states.
//! Inject an [`Arc<dyn PipelineProgressCallback>`] via
//! [`crate::config::PipelineConfigBuilder::progress_callback`] to observe the
//! transitions: a CLI can drive a progress bar, a server can emit metrics.
//!
//! # Example
//!
//! ```rust
//! use resume_pipeline::{PipelineConfig, PipelineProgressCallback, PipelineStage, RequestId};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountFinalized(AtomicUsize);
//!
//! impl PipelineProgressCallback for CountFinalized {
//!     fn on_stage(&self, _id: &RequestId, stage: &PipelineStage) {
//!         if matches!(stage, PipelineStage::Finalized) {
//!             self.0.fetch_add(1, Ordering::SeqCst);
//!         }
//!     }
//! }
//!
//! let config = PipelineConfig::builder()
//!     .progress_callback(Arc::new(CountFinalized(AtomicUsize::new(0))))
//!     .build()
//!     .unwrap();
//! ```

use crate::output::RequestId;
use crate::pipeline::dispatch::DocumentFormat;
use std::fmt;
use std::sync::Arc;

/// A forward state of the pipeline. Failure is reported separately through
/// [`PipelineProgressCallback::on_failed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Received,
    Validated,
    Extracted { format: DocumentFormat },
    Finalized,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStage::Received => f.write_str("received"),
            PipelineStage::Validated => f.write_str("validated"),
            PipelineStage::Extracted { format } => write!(f, "extracted ({format})"),
            PipelineStage::Finalized => f.write_str("finalized"),
        }
    }
}

/// Called by the pipeline on each state transition of a request.
///
/// Implementations must be `Send + Sync`: batch mode runs requests
/// concurrently and calls into the same observer from several threads.
/// Both methods default to no-ops.
pub trait PipelineProgressCallback: Send + Sync {
    /// Called once per forward transition, in order.
    fn on_stage(&self, request_id: &RequestId, stage: &PipelineStage) {
        let _ = (request_id, stage);
    }

    /// Called once when the request enters the terminal failure state.
    /// No further stages are reported for that request.
    fn on_failed(&self, request_id: &RequestId, error: &str) {
        let _ = (request_id, error);
    }
}

/// A no-op implementation, used when no callback is configured.
pub struct NoopProgressCallback;

impl PipelineProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::PipelineConfig`].
pub type ProgressCallback = Arc<dyn PipelineProgressCallback>;
