use alloy::{
    primitives::{Address, U256, address, b256},
    providers::ProviderBuilder,
    transports::RpcError,
};
use batch_mint::{
    error::SubmissionError,
    submit::{ProviderSubmitter, Submitter},
    types::{BatchRequest, EncodedCall, IMintableERC1155, TxOverrides},
};
use httpmock::{Method::POST, MockServer};
use serde_json::json;

// digits only, so the address reads the same with or without checksum casing
const CONTRACT: Address = address!("0000000000000000000000000000000000001234");
const RECIPIENT: Address = address!("0000000000000000000000000000000000005678");

fn request(overrides: TxOverrides) -> BatchRequest {
    let calls = (1..=2u64)
        .map(|amount| {
            EncodedCall::from_call(&IMintableERC1155::mintToCall {
                to: RECIPIENT,
                tokenId: U256::MAX,
                uri: format!("ipfs://{amount}/0"),
                amount: U256::from(amount),
            })
        })
        .collect();
    BatchRequest::new(CONTRACT, calls).with_overrides(overrides)
}

fn submitter(server: &MockServer) -> ProviderSubmitter<impl alloy::providers::Provider> {
    let provider = ProviderBuilder::new()
        .disable_recommended_fillers()
        .connect_http(server.url("/").parse().unwrap());
    ProviderSubmitter::new(provider)
}

#[tokio::test]
async fn test_sends_one_transaction() {
    let tx_hash = b256!("00000000000000000000000000000000000000000000000000000000000000ab");
    let request = request(TxOverrides {
        gas_limit: Some(1_000_000),
        nonce: Some(3),
        ..Default::default()
    });

    let server = MockServer::start_async().await;
    let calldata = format!(r#""input":"{}""#, request.calldata());
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .body_contains(r#""method":"eth_sendTransaction""#)
                .body_contains(r#""to":"0x0000000000000000000000000000000000001234""#)
                .body_contains(r#""gas":"0xf4240""#)
                .body_contains(r#""nonce":"0x3""#)
                .body_contains(calldata.as_str());
            then.status(200).json_body(json!({ "jsonrpc": "2.0", "id": 0, "result": tx_hash }));
        })
        .await;

    let submitted = submitter(&server).submit(&request).await.unwrap();

    mock.assert_async().await;
    assert_eq!(submitted.tx_hash, tx_hash);
    assert_eq!(submitted.target, CONTRACT);
    assert_eq!(submitted.calls, 2);
}

#[tokio::test]
async fn test_rpc_error_is_surfaced() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).body_contains(r#""method":"eth_sendTransaction""#);
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "id": 0,
                "error": { "code": -32000, "message": "insufficient funds for gas" }
            }));
        })
        .await;

    let err = submitter(&server).submit(&request(TxOverrides::default())).await.unwrap_err();

    mock.assert_async().await;
    assert!(matches!(
        err,
        SubmissionError::Rpc(RpcError::ErrorResp(ref payload)) if payload.code == -32000
    ));
}
