use alloy::primitives::{I256, U256};

/// Errors returned while encoding a resolved item into a call.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// A negative value was given for an unsigned parameter.
    #[error("{field} must not be negative, got {value}")]
    Negative {
        /// The offending field.
        field: &'static str,
        /// The rejected value.
        value: I256,
    },
    /// A value does not fit the parameter's bit width.
    #[error("{field} does not fit in uint{bits}, got {value}")]
    Overflow {
        /// The offending field.
        field: &'static str,
        /// The bit width of the parameter.
        bits: usize,
        /// The rejected value.
        value: U256,
    },
    /// An explicit token id collides with the new-token sentinel of the parameter width.
    #[error("token_id {value} is reserved for new tokens in uint{bits}")]
    ReservedTokenId {
        /// The bit width of the parameter.
        bits: usize,
        /// The rejected id.
        value: U256,
    },
    /// The target function does not accept the bound value.
    #[error("{field} cannot be bound to a `{ty}` parameter")]
    TypeMismatch {
        /// The offending field.
        field: &'static str,
        /// The Solidity type of the parameter.
        ty: String,
    },
    /// The number of bound arguments does not match the function inputs.
    #[error("function takes {expected} arguments, {actual} bound")]
    ArgumentCount {
        /// Number of function inputs.
        expected: usize,
        /// Number of bound arguments.
        actual: usize,
    },
    /// The function signature could not be parsed.
    #[error("invalid function signature `{signature}`: {reason}")]
    InvalidSignature {
        /// The rejected signature.
        signature: String,
        /// Why parsing failed.
        reason: String,
    },
    /// A fixed argument could not be coerced to its parameter type.
    #[error("cannot coerce `{value}` to `{ty}`")]
    InvalidArgument {
        /// The fixed argument.
        value: String,
        /// The Solidity type of the parameter.
        ty: String,
    },
    /// An error occurred during ABI encoding.
    #[error(transparent)]
    Abi(#[from] alloy::dyn_abi::Error),
}

impl EncodeError {
    /// The name of the field that could not be encoded.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Negative { field, .. }
            | Self::Overflow { field, .. }
            | Self::TypeMismatch { field, .. } => field,
            Self::ReservedTokenId { .. } => "token_id",
            Self::InvalidSignature { .. } => "signature",
            Self::ArgumentCount { .. } | Self::InvalidArgument { .. } | Self::Abi(_) => {
                "arguments"
            }
        }
    }
}
