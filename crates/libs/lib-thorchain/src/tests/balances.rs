use super::*;
use crate::balances::BalanceClient;
use axum::routing::post;
use axum::Json;
use lib_core::{AppError, Chain};
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;

async fn graphql(Json(request): Json<Value>) -> Json<Value> {
    let query = request["query"].as_str().unwrap_or_default();
    let address = request["variables"]["address"].as_str().unwrap_or_default();

    if address == "0xbroken" {
        return Json(json!({ "errors": [{ "message": "upstream timeout" }] }));
    }
    if query.contains("ethereum(") {
        return Json(json!({
            "data": {
                "ethereum": {
                    "balances": [
                        { "asset": { "contract": null, "symbol": "ETH", "decimals": 18 }, "amount": { "value": "1.5" } },
                        { "asset": { "contract": "0xa0b8", "symbol": "USDC", "decimals": 6 }, "amount": { "value": "250" } }
                    ]
                }
            }
        }));
    }
    Json(json!({ "data": {} }))
}

async fn client() -> BalanceClient {
    let router = Router::new().route("/graphql", post(graphql));
    let base = spawn_mock(router).await;
    BalanceClient::new(test_http(), Some(format!("{}/graphql", base)))
}

#[tokio::test]
async fn test_balances_for_chain() {
    let balances = client().await;

    let entries = balances
        .get_balance_per_chain_and_address(Chain::Eth, "0xabc", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(entries.len(), 2);
    assert!(entries[0].is_native());
    assert_eq!(entries[1].asset.contract.as_deref(), Some("0xa0b8"));
    assert_eq!(entries[1].amount.value, "250");
}

#[tokio::test]
async fn test_missing_chain_key_is_not_found() {
    let balances = client().await;

    let err = balances
        .get_balance_per_chain_and_address(Chain::Avax, "0xabc", &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_graphql_errors_are_rpc_errors() {
    let balances = client().await;

    let err = balances
        .get_balance_per_chain_and_address(Chain::Eth, "0xbroken", &CancellationToken::new())
        .await
        .unwrap_err();

    match err {
        AppError::Rpc(message) => assert_eq!(message, "upstream timeout"),
        other => panic!("expected Rpc error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unconfigured_endpoint() {
    let balances = BalanceClient::new(test_http(), None);

    let err = balances
        .get_balance_per_chain_and_address(Chain::Eth, "0xabc", &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Config(_)));
}
