//! Contract support detection.
//!
//! Solidity dispatchers compare the calldata selector against `PUSH4 <selector>` constants, so a
//! selector missing from the deployed bytecode means the function is not implemented.
//!
//! Minimal proxies (EIP-1167) and EIP-1967 proxies delegate every call, so their implementation's
//! bytecode is scanned instead.

use crate::types::{IMintableERC1155, IMulticall};
use alloy::{
    primitives::{Address, B256, Bytes, Selector, U256, b256, hex},
    providers::Provider,
    sol_types::SolCall,
    transports::TransportResult,
};
use tracing::debug;

/// The `PUSH4` opcode.
const PUSH4: u8 = 0x63;

/// Runtime code of an EIP-1167 minimal proxy, before the implementation address.
const MINIMAL_PROXY_PREFIX: [u8; 10] = hex!("363d3d373d3d3d363d73");

/// Runtime code of an EIP-1167 minimal proxy, after the implementation address.
const MINIMAL_PROXY_SUFFIX: [u8; 15] = hex!("5af43d82803e903d91602b57fd5bf3");

/// EIP-1967 implementation slot, `keccak256("eip1967.proxy.implementation") - 1`.
pub const EIP1967_IMPLEMENTATION_SLOT: B256 =
    b256!("360894a13ba1a3210667c828492db98dca3e2076cc3735a920a3ca505d382bbc");

/// Whether `code` contains a `PUSH4 <selector>` instruction.
pub fn supports_selector(code: &[u8], selector: Selector) -> bool {
    code.windows(5).any(|window| window[0] == PUSH4 && window[1..] == selector[..])
}

/// Whether `code` contains every one of `selectors`.
pub fn supports_all(code: &[u8], selectors: &[Selector]) -> bool {
    selectors.iter().all(|selector| supports_selector(code, *selector))
}

/// Returns the implementation address of an EIP-1167 minimal proxy.
pub fn minimal_proxy_implementation(code: &[u8]) -> Option<Address> {
    let rest = code.strip_prefix(&MINIMAL_PROXY_PREFIX)?;
    let address = rest.strip_suffix(&MINIMAL_PROXY_SUFFIX)?;
    (address.len() == Address::len_bytes()).then(|| Address::from_slice(address))
}

/// Returns the contract `contract` delegates to, given its runtime `code`.
///
/// Minimal proxies are recognized from their code, anything else through the EIP-1967
/// implementation slot. Returns `None` for contracts that are not proxies.
pub async fn implementation<P: Provider>(
    provider: &P,
    contract: Address,
    code: &Bytes,
) -> TransportResult<Option<Address>> {
    if let Some(implementation) = minimal_proxy_implementation(code) {
        return Ok(Some(implementation));
    }

    let slot = provider
        .get_storage_at(contract, U256::from_be_bytes(EIP1967_IMPLEMENTATION_SLOT.0))
        .await?;
    let implementation = Address::from_word(slot.into());
    Ok((!implementation.is_zero()).then_some(implementation))
}

/// Checks whether `contract` implements `selector` and can batch calls through `multicall`.
///
/// If `contract` is a proxy missing the selectors itself, its implementation is checked instead.
pub async fn supports_batch<P: Provider>(
    provider: &P,
    contract: Address,
    selector: Selector,
) -> TransportResult<bool> {
    let selectors = [selector, IMulticall::multicallCall::SELECTOR.into()];

    let code = provider.get_code_at(contract).await?;
    let mut supported = supports_all(&code, &selectors);

    if !supported
        && let Some(implementation) = implementation(provider, contract, &code).await?
    {
        let code = provider.get_code_at(implementation).await?;
        supported = supports_all(&code, &selectors);
        debug!(%contract, %implementation, "Resolved proxy implementation");
    }

    debug!(%contract, %selector, supported, code_len = code.len(), "Checked batch support");
    Ok(supported)
}

/// Checks whether `contract` implements both `mintTo` and `multicall`.
pub async fn supports_mint_to_batch<P: Provider>(
    provider: &P,
    contract: Address,
) -> TransportResult<bool> {
    supports_batch(provider, contract, IMintableERC1155::mintToCall::SELECTOR.into()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::{primitives::address, providers::ProviderBuilder};
    use httpmock::{Method::POST, MockServer};
    use serde_json::json;

    // digits only, so addresses serialize identically with or without checksum casing
    const PROXY: Address = address!("0000000000000000000000000000000000001234");
    const IMPLEMENTATION: Address = address!("0000000000000000000000000000000000005678");

    fn minimal_proxy(implementation: Address) -> Vec<u8> {
        [&MINIMAL_PROXY_PREFIX[..], implementation.as_slice(), &MINIMAL_PROXY_SUFFIX[..]].concat()
    }

    fn batch_code() -> String {
        hex::encode_prefixed(code_with(&[
            IMintableERC1155::mintToCall::SELECTOR,
            IMulticall::multicallCall::SELECTOR,
        ]))
    }

    fn provider(server: &MockServer) -> impl Provider {
        ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_http(server.url("/").parse().unwrap())
    }

    /// Answers `method` calls mentioning `param` with `result`.
    async fn rpc(server: &MockServer, id: u64, method: &str, param: &str, result: String) {
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .body_contains(format!(r#""method":"{method}""#))
                    .body_contains(param);
                then.status(200)
                    .json_body(json!({ "jsonrpc": "2.0", "id": id, "result": result }));
            })
            .await;
    }

    fn code_with(selectors: &[[u8; 4]]) -> Vec<u8> {
        // PUSH1 0x80 PUSH1 0x40 MSTORE, then a dispatcher entry per selector
        let mut code = vec![0x60, 0x80, 0x60, 0x40, 0x52];
        for selector in selectors {
            code.push(PUSH4);
            code.extend_from_slice(selector);
            code.extend_from_slice(&[0x14, 0x61, 0x00, 0x10, 0x57]);
        }
        code
    }

    #[test]
    fn test_supports_selector() {
        let mint_to = IMintableERC1155::mintToCall::SELECTOR;
        let multicall = IMulticall::multicallCall::SELECTOR;

        let code = code_with(&[mint_to, multicall]);
        assert!(supports_selector(&code, mint_to.into()));
        assert!(supports_all(&code, &[mint_to.into(), multicall.into()]));

        let code = code_with(&[mint_to]);
        assert!(!supports_all(&code, &[mint_to.into(), multicall.into()]));
    }

    #[test]
    fn test_selector_without_push4() {
        let selector = IMulticall::multicallCall::SELECTOR;
        let mut code = vec![0x00];
        code.extend_from_slice(&selector);
        assert!(!supports_selector(&code, selector.into()));
        assert!(!supports_selector(&[], selector.into()));
    }

    #[test]
    fn test_minimal_proxy_implementation() {
        assert_eq!(
            minimal_proxy_implementation(&minimal_proxy(IMPLEMENTATION)),
            Some(IMPLEMENTATION)
        );

        let mut code = minimal_proxy(IMPLEMENTATION);
        code.pop();
        assert_eq!(minimal_proxy_implementation(&code), None);
        assert_eq!(minimal_proxy_implementation(&code_with(&[[0; 4]])), None);
    }

    #[tokio::test]
    async fn test_supports_batch_through_minimal_proxy() {
        let server = MockServer::start_async().await;
        let proxy_code = hex::encode_prefixed(minimal_proxy(IMPLEMENTATION));
        rpc(&server, 0, "eth_getCode", &PROXY.to_string(), proxy_code).await;
        rpc(&server, 1, "eth_getCode", &IMPLEMENTATION.to_string(), batch_code()).await;

        assert!(supports_mint_to_batch(&provider(&server), PROXY).await.unwrap());
    }

    #[tokio::test]
    async fn test_supports_batch_through_eip1967_proxy() {
        let server = MockServer::start_async().await;
        // a delegating fallback without any selector of its own
        let proxy_code = hex::encode_prefixed(code_with(&[]));
        let slot = EIP1967_IMPLEMENTATION_SLOT.to_string();
        rpc(&server, 0, "eth_getCode", &PROXY.to_string(), proxy_code).await;
        rpc(&server, 1, "eth_getStorageAt", &slot, IMPLEMENTATION.into_word().to_string()).await;
        rpc(&server, 2, "eth_getCode", &IMPLEMENTATION.to_string(), batch_code()).await;

        assert!(supports_mint_to_batch(&provider(&server), PROXY).await.unwrap());
    }

    #[tokio::test]
    async fn test_plain_contract_without_selectors() {
        let server = MockServer::start_async().await;
        let code = hex::encode_prefixed(code_with(&[]));
        rpc(&server, 0, "eth_getCode", &PROXY.to_string(), code).await;
        rpc(&server, 1, "eth_getStorageAt", &PROXY.to_string(), B256::ZERO.to_string()).await;

        assert!(!supports_mint_to_batch(&provider(&server), PROXY).await.unwrap());
    }
}
