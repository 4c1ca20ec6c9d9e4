//! Batch composition.
//!
//! Resolves every item, encodes one call per item in input order and assembles the calls into a
//! [`BatchRequest`]. Composition is all-or-nothing: either every item is encoded or no request is
//! produced.

use crate::{
    encode::{CallBuilder, MintTo},
    error::BatchError,
    metrics::BatchMetrics,
    resolve::{ItemResolver, Uploader},
    types::{BatchItem, BatchRequest, EncodedCall, ResolvedItem, TxOverrides},
};
use alloy::primitives::Address;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Composes batch items into a [`BatchRequest`].
#[derive(Debug, Clone)]
pub struct BatchComposer {
    resolver: ItemResolver,
    metrics: Arc<BatchMetrics>,
}

impl BatchComposer {
    /// Creates a new [`BatchComposer`] resolving raw metadata through `uploader`.
    pub fn new(uploader: Arc<dyn Uploader>) -> Self {
        let metrics = Arc::new(BatchMetrics::default());
        Self { resolver: ItemResolver::new(uploader).with_metrics(metrics.clone()), metrics }
    }

    /// Returns the item resolver.
    pub fn resolver(&self) -> &ItemResolver {
        &self.resolver
    }

    /// Composes `items` into a batch of calls against `target`, built by `builder`.
    ///
    /// Items are resolved first; encoding only starts once every item resolved. The calls of the
    /// returned request are in the order of `items`. An empty item list yields an empty request.
    #[instrument(skip(self, items, builder), fields(items = items.len()))]
    pub async fn compose<B>(
        &self,
        target: Address,
        items: &[BatchItem],
        builder: &B,
    ) -> Result<BatchRequest, BatchError>
    where
        B: CallBuilder + ?Sized,
    {
        let resolved = self.resolver.resolve(items).await?;

        let calls = encode_all(&resolved, builder).inspect_err(|err| {
            warn!(index = ?err.index(), error = %err, "Failed to encode batch");
            self.metrics.failed_encodings.increment(1);
        })?;

        self.metrics.composed.increment(1);
        self.metrics.encoded_calls.increment(calls.len() as u64);
        debug!(calls = calls.len(), "Composed batch");

        Ok(BatchRequest::new(target, calls))
    }

    /// Same as [`Self::compose`], attaching `overrides` to the request.
    pub async fn compose_with_overrides<B>(
        &self,
        target: Address,
        items: &[BatchItem],
        builder: &B,
        overrides: TxOverrides,
    ) -> Result<BatchRequest, BatchError>
    where
        B: CallBuilder + ?Sized,
    {
        Ok(self.compose(target, items, builder).await?.with_overrides(overrides))
    }

    /// Composes an ERC-1155 batch mint of `items` to `to` on `contract`.
    ///
    /// Items without a token id mint new tokens, items with one mint additional supply.
    pub async fn mint_to_batch(
        &self,
        contract: Address,
        to: Address,
        items: &[BatchItem],
        overrides: TxOverrides,
    ) -> Result<BatchRequest, BatchError> {
        self.compose_with_overrides(contract, items, &MintTo::new(to), overrides).await
    }
}

/// Encodes every resolved item, in order.
///
/// Fails with the index of the first item that cannot be encoded.
pub fn encode_all<B>(resolved: &[ResolvedItem], builder: &B) -> Result<Vec<EncodedCall>, BatchError>
where
    B: CallBuilder + ?Sized,
{
    resolved
        .iter()
        .map(|item| {
            builder.build(item).map_err(|source| BatchError::Encoding { index: item.index, source })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EncodeError;
    use alloy::primitives::{I256, address};

    fn resolved(index: usize, quantity: I256) -> ResolvedItem {
        ResolvedItem { index, quantity, token_id: None, locator: format!("ipfs://{index}/0") }
    }

    #[test]
    fn test_encode_all_fails_on_first_bad_item() {
        let builder = MintTo::new(address!("00000000000000000000000000000000000000aa"));
        let items = [
            resolved(0, I256::ONE),
            resolved(1, I256::MINUS_ONE),
            resolved(2, I256::MINUS_ONE),
        ];

        let err = encode_all(&items, &builder).unwrap_err();
        assert_eq!(err.index(), Some(1));
        assert!(matches!(
            err,
            BatchError::Encoding { source: EncodeError::Negative { field: "quantity", .. }, .. }
        ));
    }

    #[test]
    fn test_encode_all_keeps_order() {
        let builder = MintTo::new(address!("00000000000000000000000000000000000000aa"));
        let items = [resolved(0, I256::ONE), resolved(1, I256::ONE)];

        let calls = encode_all(&items, &builder).unwrap();
        assert_eq!(
            calls,
            vec![builder.build(&items[0]).unwrap(), builder.build(&items[1]).unwrap()]
        );
    }
}
