//! Batch metrics.
//!
//! Metrics are recorded through the [`metrics`] facade; installing an exporter is up to the
//! embedding application.

use metrics::Counter;
use metrics_derive::Metrics;

/// Metrics of the batch pipeline.
#[derive(Metrics)]
#[metrics(scope = "batch")]
pub struct BatchMetrics {
    /// Number of metadata uploads started.
    pub uploads: Counter,
    /// Number of item resolutions that failed.
    pub failed_resolutions: Counter,
    /// Number of items that could not be encoded.
    pub failed_encodings: Counter,
    /// Number of batches composed.
    pub composed: Counter,
    /// Number of calls encoded into composed batches.
    pub encoded_calls: Counter,
    /// Number of batches submitted.
    pub submitted: Counter,
    /// Number of batch submissions that failed.
    pub failed_submissions: Counter,
}
