//! Call builder for arbitrary function signatures.

use super::{CallBuilder, to_unsigned, token_id};
use crate::{
    error::EncodeError,
    types::{EncodedCall, ResolvedItem},
};
use alloy::{
    dyn_abi::{DynSolType, DynSolValue, JsonAbiExt, Specifier},
    json_abi::Function,
};
use std::{convert::Infallible, str::FromStr};

/// Source of one function argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgSlot {
    /// The item quantity. Binds to a `uintN` parameter.
    Quantity,
    /// The item token id, or the new-token sentinel. Binds to a `uintN` parameter.
    TokenId,
    /// The resolved metadata locator. Binds to a `string` parameter.
    Locator,
    /// A fixed value, coerced to the parameter type, e.g. a recipient address.
    Fixed(String),
}

impl FromStr for ArgSlot {
    type Err = Infallible;

    /// Parses `$quantity`, `$tokenId` and `$locator` placeholders; anything else is fixed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "$quantity" => Self::Quantity,
            "$tokenId" | "$token_id" => Self::TokenId,
            "$locator" | "$uri" => Self::Locator,
            value => Self::Fixed(value.to_string()),
        })
    }
}

/// A slot validated against its parameter type.
#[derive(Debug, Clone, PartialEq)]
enum Binding {
    Quantity { bits: usize },
    TokenId { bits: usize },
    Locator,
    Fixed(DynSolValue),
}

/// [`CallBuilder`] encoding items against a human-readable function signature.
///
/// ```ignore
/// let builder = SignatureCallBuilder::new(
///     "mintTo(address,uint256,string,uint256)",
///     vec![
///         ArgSlot::Fixed(recipient.to_string()),
///         ArgSlot::TokenId,
///         ArgSlot::Locator,
///         ArgSlot::Quantity,
///     ],
/// )?;
/// ```
#[derive(Debug, Clone)]
pub struct SignatureCallBuilder {
    function: Function,
    bindings: Vec<Binding>,
}

impl SignatureCallBuilder {
    /// Parses `signature` and binds `slots` to its inputs, in order.
    pub fn new(signature: &str, slots: Vec<ArgSlot>) -> Result<Self, EncodeError> {
        let function = Function::parse(signature).map_err(|err| EncodeError::InvalidSignature {
            signature: signature.to_string(),
            reason: err.to_string(),
        })?;

        if function.inputs.len() != slots.len() {
            return Err(EncodeError::ArgumentCount {
                expected: function.inputs.len(),
                actual: slots.len(),
            });
        }

        let bindings = function
            .inputs
            .iter()
            .zip(slots)
            .map(|(param, slot)| bind(param.resolve()?, slot))
            .collect::<Result<Vec<_>, EncodeError>>()?;

        Ok(Self { function, bindings })
    }

    /// The function calls are encoded against.
    pub fn function(&self) -> &Function {
        &self.function
    }
}

/// Validates `slot` against the parameter type `ty`.
fn bind(ty: DynSolType, slot: ArgSlot) -> Result<Binding, EncodeError> {
    match (slot, &ty) {
        (ArgSlot::Quantity, DynSolType::Uint(bits)) => Ok(Binding::Quantity { bits: *bits }),
        (ArgSlot::TokenId, DynSolType::Uint(bits)) => Ok(Binding::TokenId { bits: *bits }),
        (ArgSlot::Locator, DynSolType::String) => Ok(Binding::Locator),
        (ArgSlot::Fixed(value), _) => ty
            .coerce_str(&value)
            .map(Binding::Fixed)
            .map_err(|_| EncodeError::InvalidArgument { value, ty: ty.sol_type_name().into() }),
        (ArgSlot::Quantity, _) => {
            Err(EncodeError::TypeMismatch { field: "quantity", ty: ty.sol_type_name().into() })
        }
        (ArgSlot::TokenId, _) => {
            Err(EncodeError::TypeMismatch { field: "token_id", ty: ty.sol_type_name().into() })
        }
        (ArgSlot::Locator, _) => {
            Err(EncodeError::TypeMismatch { field: "locator", ty: ty.sol_type_name().into() })
        }
    }
}

impl CallBuilder for SignatureCallBuilder {
    fn build(&self, item: &ResolvedItem) -> Result<EncodedCall, EncodeError> {
        let values = self
            .bindings
            .iter()
            .map(|binding| {
                Ok(match binding {
                    Binding::Quantity { bits } => {
                        DynSolValue::Uint(to_unsigned("quantity", item.quantity, *bits)?, *bits)
                    }
                    Binding::TokenId { bits } => DynSolValue::Uint(token_id(item, *bits)?, *bits),
                    Binding::Locator => DynSolValue::String(item.locator.clone()),
                    Binding::Fixed(value) => value.clone(),
                })
            })
            .collect::<Result<Vec<_>, EncodeError>>()?;

        let data = self.function.abi_encode_input(&values)?;
        Ok(EncodedCall::from_parts(self.function.selector(), data.into()))
    }
}
