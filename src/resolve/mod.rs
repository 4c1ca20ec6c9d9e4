//! Item resolution.
//!
//! Turns every [`BatchItem`]'s metadata reference into a concrete locator, uploading raw metadata
//! through an [`Uploader`]. Uploads run concurrently, results stay aligned with the input.

mod ipfs;
pub use ipfs::IpfsUploader;

use crate::{
    error::{BatchError, UploadError},
    metrics::BatchMetrics,
    types::{BatchItem, MetadataRef, NftMetadata, ResolvedItem},
};
use async_trait::async_trait;
use futures_util::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Stores raw metadata and returns a locator pointing at it.
///
/// Retries and timeouts are the uploader's responsibility.
#[async_trait]
pub trait Uploader: Send + Sync + std::fmt::Debug {
    /// Uploads `metadata`, returning its locator.
    async fn upload(&self, metadata: &NftMetadata) -> Result<String, UploadError>;
}

/// Resolves the metadata references of batch items.
#[derive(Debug, Clone)]
pub struct ItemResolver {
    uploader: Arc<dyn Uploader>,
    metrics: Arc<BatchMetrics>,
}

impl ItemResolver {
    /// Creates a new [`ItemResolver`] uploading through `uploader`.
    pub fn new(uploader: Arc<dyn Uploader>) -> Self {
        Self { uploader, metrics: Arc::new(BatchMetrics::default()) }
    }

    /// Sets the metrics the resolver reports to.
    pub fn with_metrics(mut self, metrics: Arc<BatchMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Resolves all `items` concurrently.
    ///
    /// The output has the same length as `items` and `output[i]` belongs to `items[i]`. If any
    /// upload fails the whole resolution fails with the index of the failing item, and the
    /// uploads still in flight are dropped.
    #[instrument(skip_all, fields(items = items.len()))]
    pub async fn resolve(&self, items: &[BatchItem]) -> Result<Vec<ResolvedItem>, BatchError> {
        let uploads = items.iter().filter(|item| item.metadata.needs_upload()).count();
        debug!(uploads, "Resolving batch items");

        let resolved = try_join_all(
            items.iter().enumerate().map(|(index, item)| self.resolve_item(index, item)),
        )
        .await?;

        debug!(uploads, "Resolved batch items");
        Ok(resolved)
    }

    /// Resolves a single item. Already resolved locators are returned without any I/O.
    async fn resolve_item(
        &self,
        index: usize,
        item: &BatchItem,
    ) -> Result<ResolvedItem, BatchError> {
        let locator = match &item.metadata {
            MetadataRef::Locator(locator) => locator.clone(),
            MetadataRef::Raw(metadata) => {
                self.metrics.uploads.increment(1);
                self.uploader.upload(metadata).await.map_err(|source| {
                    warn!(index, error = %source, "Failed to upload item metadata");
                    self.metrics.failed_resolutions.increment(1);
                    BatchError::Resolution { index, source }
                })?
            }
        };

        Ok(ResolvedItem::new(index, item, locator))
    }
}
