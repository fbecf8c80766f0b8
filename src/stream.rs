//! Batch analysis: many independent documents, results as they finish.
//!
//! Each input is its own request with its own request id; nothing is shared
//! between them except the read-only config. Up to `config.concurrency`
//! requests run at once and items arrive in completion order, not input
//! order.

use crate::analyze::analyze;
use crate::config::PipelineConfig;
use crate::error::ResumeError;
use crate::output::{RequestId, ResumeSummary};
use crate::pipeline::input;
use futures::stream::{self, StreamExt};
use std::pin::Pin;
use tokio_stream::Stream;
use tracing::debug;

/// The outcome of one input in a batch.
#[derive(Debug)]
pub struct BatchItem {
    /// The path or URL as given.
    pub input: String,
    /// Correlation id assigned to this request, also used in its log lines.
    pub request_id: RequestId,
    pub result: Result<ResumeSummary, ResumeError>,
}

/// A boxed stream of batch items.
pub type AnalysisStream = Pin<Box<dyn Stream<Item = BatchItem> + Send>>;

/// Analyse every input, yielding each result as soon as it is ready.
pub fn analyze_stream<I, S>(inputs: I, config: &PipelineConfig) -> AnalysisStream
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let inputs: Vec<String> = inputs.into_iter().map(Into::into).collect();
    debug!("Starting batch of {} inputs", inputs.len());

    let concurrency = config.concurrency.max(1);
    let config = config.clone();

    Box::pin(
        stream::iter(inputs.into_iter().map(move |input| {
            let config = config.clone();
            async move {
                let request_id = RequestId::generate();
                let result =
                    match input::resolve_input(&input, config.download_timeout_secs).await {
                        Ok(doc) => {
                            let doc = doc.with_request_id(request_id.clone());
                            analyze(&doc, &config).await
                        }
                        Err(e) => {
                            if let Some(ref cb) = config.progress_callback {
                                cb.on_failed(&request_id, &e.to_string());
                            }
                            Err(e)
                        }
                    };
                BatchItem {
                    input,
                    request_id,
                    result,
                }
            }
        }))
        .buffer_unordered(concurrency),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_input_yields_one_item() {
        let config = PipelineConfig::builder().concurrency(2).build().unwrap();
        let inputs = vec!["/missing/a.pdf", "/missing/b.docx", "/missing/c.txt"];
        let mut items: Vec<BatchItem> = analyze_stream(inputs, &config).collect().await;
        items.sort_by(|a, b| a.input.cmp(&b.input));

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].input, "/missing/a.pdf");
        assert!(items
            .iter()
            .all(|i| matches!(i.result, Err(ResumeError::FileNotFound { .. }))));
    }

    #[tokio::test]
    async fn request_ids_are_distinct() {
        let items: Vec<BatchItem> =
            analyze_stream(["/missing/a.pdf", "/missing/b.pdf"], &PipelineConfig::default())
                .collect()
                .await;
        assert_ne!(items[0].request_id, items[1].request_id);
    }

    #[tokio::test]
    async fn empty_batch() {
        let items: Vec<BatchItem> = analyze_stream(Vec::<String>::new(), &PipelineConfig::default())
            .collect()
            .await;
        assert!(items.is_empty());
    }
}
