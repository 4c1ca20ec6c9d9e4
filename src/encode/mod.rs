//! Call encoding.
//!
//! A [`CallBuilder`] turns a [`ResolvedItem`] into an [`EncodedCall`]. ABI work is delegated to
//! `alloy`, builders only bind item fields to function arguments.

mod mint;
pub use mint::MintTo;

mod signature;
pub use signature::{ArgSlot, SignatureCallBuilder};

use crate::{
    constants::NEW_TOKEN_ID,
    error::EncodeError,
    types::{EncodedCall, ResolvedItem},
};
use alloy::primitives::{I256, U256};

/// Encodes one resolved item into a call against the batch target.
///
/// Implementations must be pure: the same item always yields the same call.
pub trait CallBuilder {
    /// Builds the call for `item`.
    fn build(&self, item: &ResolvedItem) -> Result<EncodedCall, EncodeError>;
}

impl<F> CallBuilder for F
where
    F: Fn(&ResolvedItem) -> Result<EncodedCall, EncodeError>,
{
    fn build(&self, item: &ResolvedItem) -> Result<EncodedCall, EncodeError> {
        self(item)
    }
}

/// Converts `value` into an unsigned integer of `bits` width.
pub fn to_unsigned(field: &'static str, value: I256, bits: usize) -> Result<U256, EncodeError> {
    if value.is_negative() {
        return Err(EncodeError::Negative { field, value });
    }
    let value = value.into_raw();
    if value.bit_len() > bits {
        return Err(EncodeError::Overflow { field, bits, value });
    }
    Ok(value)
}

/// Returns the token id to encode for `item` in a `uint{bits}` parameter.
///
/// Items without an explicit id get the maximum value of the parameter width, which receiving
/// contracts read as "allocate a new token". An explicit id, `0` included, is kept as-is; an
/// explicit id equal to that maximum is rejected so the sentinel only ever means "new token".
pub fn token_id(item: &ResolvedItem, bits: usize) -> Result<U256, EncodeError> {
    let sentinel = NEW_TOKEN_ID >> (256 - bits.min(256));
    match item.token_id {
        Some(token_id) if token_id.bit_len() > bits => {
            Err(EncodeError::Overflow { field: "token_id", bits, value: token_id })
        }
        Some(token_id) if token_id == sentinel => {
            Err(EncodeError::ReservedTokenId { bits, value: token_id })
        }
        Some(token_id) => Ok(token_id),
        None => Ok(sentinel),
    }
}
