use super::{CallBuilder, to_unsigned, token_id};
use crate::{
    error::EncodeError,
    types::{EncodedCall, IMintableERC1155, ResolvedItem},
};
use alloy::primitives::Address;

/// Builds `IMintableERC1155::mintTo` calls minting each item to a fixed recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintTo {
    /// The recipient of every minted token.
    pub to: Address,
}

impl MintTo {
    /// Creates a new [`MintTo`] builder minting to `to`.
    pub fn new(to: Address) -> Self {
        Self { to }
    }
}

impl CallBuilder for MintTo {
    fn build(&self, item: &ResolvedItem) -> Result<EncodedCall, EncodeError> {
        Ok(EncodedCall::from_call(&IMintableERC1155::mintToCall {
            to: self.to,
            tokenId: token_id(item, 256)?,
            uri: item.locator.clone(),
            amount: to_unsigned("quantity", item.quantity, 256)?,
        }))
    }
}
