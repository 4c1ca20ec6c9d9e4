//! Aggregated batch requests.

use super::{EncodedCall, IMulticall};
use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, U256},
    rpc::types::TransactionRequest,
    sol_types::SolCall,
};
use serde::{Deserialize, Serialize};

/// Transaction-level overrides.
///
/// Overrides are opaque to the composer and applied to the outbound transaction unmodified;
/// unset fields are left for the provider to fill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOverrides {
    /// Sender of the transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    /// Gas limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<u64>,
    /// Native value sent with the transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    /// Sender nonce.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u64>,
    /// EIP-1559 max fee per gas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fee_per_gas: Option<u128>,
    /// EIP-1559 max priority fee per gas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_priority_fee_per_gas: Option<u128>,
}

impl TxOverrides {
    /// Fills every field unset in `self` from `defaults`.
    pub fn or(self, defaults: &Self) -> Self {
        Self {
            from: self.from.or(defaults.from),
            gas_limit: self.gas_limit.or(defaults.gas_limit),
            value: self.value.or(defaults.value),
            nonce: self.nonce.or(defaults.nonce),
            max_fee_per_gas: self.max_fee_per_gas.or(defaults.max_fee_per_gas),
            max_priority_fee_per_gas: self
                .max_priority_fee_per_gas
                .or(defaults.max_priority_fee_per_gas),
        }
    }

    /// Applies the overrides to a transaction request.
    pub fn apply(&self, mut tx: TransactionRequest) -> TransactionRequest {
        if let Some(from) = self.from {
            tx.set_from(from);
        }
        if let Some(gas_limit) = self.gas_limit {
            tx.set_gas_limit(gas_limit);
        }
        if let Some(value) = self.value {
            tx.set_value(value);
        }
        if let Some(nonce) = self.nonce {
            tx.set_nonce(nonce);
        }
        if let Some(max_fee_per_gas) = self.max_fee_per_gas {
            tx.set_max_fee_per_gas(max_fee_per_gas);
        }
        if let Some(max_priority_fee_per_gas) = self.max_priority_fee_per_gas {
            tx.set_max_priority_fee_per_gas(max_priority_fee_per_gas);
        }
        tx
    }
}

/// An ordered list of encoded calls against one contract, submitted as a single `multicall`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    /// The contract every call is executed against.
    pub target: Address,
    /// Encoded calls, in the order of the originating items.
    pub calls: Vec<EncodedCall>,
    /// Transaction overrides.
    pub overrides: TxOverrides,
}

impl BatchRequest {
    /// Creates a new [`BatchRequest`] without overrides.
    pub fn new(target: Address, calls: Vec<EncodedCall>) -> Self {
        Self { target, calls, overrides: TxOverrides::default() }
    }

    /// Sets the transaction overrides.
    pub fn with_overrides(mut self, overrides: TxOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Number of calls in the batch.
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// Whether the batch has no calls.
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// The `multicall` invocation wrapping every call of the batch.
    pub fn multicall(&self) -> IMulticall::multicallCall {
        IMulticall::multicallCall {
            data: self.calls.iter().map(|call| call.data().clone()).collect(),
        }
    }

    /// ABI-encoded `multicall` calldata.
    pub fn calldata(&self) -> Bytes {
        self.multicall().abi_encode().into()
    }

    /// Builds the outbound transaction request addressed at the target.
    pub fn to_transaction_request(&self) -> TransactionRequest {
        self.overrides
            .apply(TransactionRequest::default().with_to(self.target).with_input(self.calldata()))
    }
}
