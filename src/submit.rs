//! Batch submission.
//!
//! A [`Submitter`] sends a [`BatchRequest`] as exactly one transaction. The request's calls and
//! overrides are forwarded unmodified; failures are surfaced to the caller as-is.

use crate::{error::SubmissionError, metrics::BatchMetrics, types::BatchRequest};
use alloy::{
    primitives::{Address, TxHash},
    providers::Provider,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// A batch accepted by the execution collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmittedBatch {
    /// Hash of the aggregated transaction.
    pub tx_hash: TxHash,
    /// The contract the batch was sent to.
    pub target: Address,
    /// Number of calls in the batch.
    pub calls: usize,
}

/// Sends aggregated batch transactions.
#[async_trait]
pub trait Submitter: Send + Sync {
    /// Submits `request` as a single transaction.
    async fn submit(&self, request: &BatchRequest) -> Result<SubmittedBatch, SubmissionError>;
}

/// [`Submitter`] sending batches through an [`alloy`] provider.
///
/// The provider is expected to sign, e.g. through a wallet filler.
#[derive(Debug, Clone)]
pub struct ProviderSubmitter<P> {
    provider: P,
    /// Confirmations to wait for before returning, if any.
    confirmations: Option<u64>,
    metrics: Arc<BatchMetrics>,
}

impl<P> ProviderSubmitter<P> {
    /// Creates a new [`ProviderSubmitter`] that returns as soon as the transaction is sent.
    pub fn new(provider: P) -> Self {
        Self { provider, confirmations: None, metrics: Arc::new(BatchMetrics::default()) }
    }

    /// Waits for `confirmations` blocks before returning from [`Submitter::submit`].
    pub fn with_confirmations(mut self, confirmations: u64) -> Self {
        self.confirmations = Some(confirmations);
        self
    }

    /// Sets the metrics the submitter reports to.
    pub fn with_metrics(mut self, metrics: Arc<BatchMetrics>) -> Self {
        self.metrics = metrics;
        self
    }
}

impl<P: Provider> ProviderSubmitter<P> {
    async fn send(&self, request: &BatchRequest) -> Result<TxHash, SubmissionError> {
        if request.is_empty() {
            return Err(SubmissionError::EmptyBatch);
        }

        let pending = self.provider.send_transaction(request.to_transaction_request()).await?;
        let tx_hash = *pending.tx_hash();
        info!(%tx_hash, "Sent batch transaction");

        if let Some(confirmations) = self.confirmations {
            pending.with_required_confirmations(confirmations).watch().await?;
            debug!(%tx_hash, confirmations, "Batch transaction confirmed");
        }

        Ok(tx_hash)
    }
}

#[async_trait]
impl<P: Provider> Submitter for ProviderSubmitter<P> {
    #[instrument(skip_all, fields(contract = %request.target, calls = request.len()))]
    async fn submit(&self, request: &BatchRequest) -> Result<SubmittedBatch, SubmissionError> {
        match self.send(request).await {
            Ok(tx_hash) => {
                self.metrics.submitted.increment(1);
                Ok(SubmittedBatch { tx_hash, target: request.target, calls: request.len() })
            }
            Err(err) => {
                warn!(error = %err, "Failed to submit batch");
                self.metrics.failed_submissions.increment(1);
                Err(err)
            }
        }
    }
}
