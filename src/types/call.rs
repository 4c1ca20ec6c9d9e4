//! Encoded contract calls.

use alloy::{
    primitives::{Bytes, Selector},
    sol_types::SolCall,
};

/// A single encoded function invocation against the batch target.
///
/// `data` is the complete calldata, selector included.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EncodedCall {
    selector: Selector,
    data: Bytes,
}

impl EncodedCall {
    /// Encodes a typed call.
    pub fn from_call<C: SolCall>(call: &C) -> Self {
        Self { selector: C::SELECTOR.into(), data: call.abi_encode().into() }
    }

    /// Creates a call from a selector and the calldata starting with it.
    pub(crate) fn from_parts(selector: Selector, data: Bytes) -> Self {
        debug_assert!(data.starts_with(selector.as_slice()));
        Self { selector, data }
    }

    /// Wraps raw calldata. Returns `None` if `data` is too short to carry a selector.
    pub fn from_calldata(data: Bytes) -> Option<Self> {
        let selector = Selector::try_from(data.get(..4)?).ok()?;
        Some(Self { selector, data })
    }

    /// The function selector.
    pub fn selector(&self) -> Selector {
        self.selector
    }

    /// The full calldata.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Consumes the call, returning its calldata.
    pub fn into_data(self) -> Bytes {
        self.data
    }
}
