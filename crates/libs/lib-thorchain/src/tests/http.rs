use super::*;
use crate::http::{fetch_json, post_json};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Json;
use lib_core::AppError;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn test_fetch_json_parses_body() {
    let router = Router::new().route("/ok", get(|| async { Json(json!({ "value": 7 })) }));
    let base = spawn_mock(router).await;

    let body: Value = fetch_json(&test_http(), &format!("{}/ok", base), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(body["value"], 7);
}

#[tokio::test]
async fn test_non_success_status_embeds_code_and_body() {
    let router = Router::new().route(
        "/missing",
        get(|| async { (StatusCode::NOT_FOUND, "pool not found") }),
    );
    let base = spawn_mock(router).await;

    let err = fetch_json::<Value>(&test_http(), &format!("{}/missing", base), &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(404));
    let message = err.to_string();
    assert!(message.contains("404"));
    assert!(message.contains("pool not found"));
}

#[tokio::test]
async fn test_invalid_json_is_decoding_error() {
    let router = Router::new().route("/garbage", get(|| async { "not json" }));
    let base = spawn_mock(router).await;

    let err = fetch_json::<Value>(&test_http(), &format!("{}/garbage", base), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Decoding(_)));
}

#[tokio::test]
async fn test_post_json_sends_body() {
    let router = Router::new().route(
        "/echo",
        post(|Json(body): Json<Value>| async move { Json(json!({ "echo": body })) }),
    );
    let base = spawn_mock(router).await;

    let response: Value = post_json(
        &test_http(),
        &format!("{}/echo", base),
        &json!({ "a": 1 }),
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(response["echo"]["a"], 1);
}

#[tokio::test]
async fn test_cancelled_token_sends_nothing() {
    let hits = Hits::default();
    let router = Router::new()
        .route(
            "/count",
            get(|State(hits): State<Hits>| async move {
                hits.record();
                Json(json!({}))
            }),
        )
        .with_state(hits.clone());
    let base = spawn_mock(router).await;

    let cancel = CancellationToken::new();
    cancel.cancel();
    let err = fetch_json::<Value>(&test_http(), &format!("{}/count", base), &cancel)
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(hits.count(), 0);
}

#[tokio::test]
async fn test_cancel_mid_flight() {
    let router = Router::new().route(
        "/slow",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({}))
        }),
    );
    let base = spawn_mock(router).await;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let started = std::time::Instant::now();
    let err = fetch_json::<Value>(&test_http(), &format!("{}/slow", base), &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Cancelled));
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = fetch_json::<Value>(&test_http(), &format!("http://{}/x", addr), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Network(_)));
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_errors_do_not_carry_endpoint_path() {
    let router = Router::new().route("/v3/{key}", post(|| async { "not json" }));
    let base = spawn_mock(router).await;
    let keyed = format!("{}/v3/secretprojectkey", base);

    let err = post_json::<_, Value>(&test_http(), &keyed, &json!({}), &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Decoding(_)));
    assert!(!err.to_string().contains("secretprojectkey"));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let err = post_json::<_, Value>(
        &test_http(),
        &format!("http://{}/v3/secretprojectkey", addr),
        &json!({}),
        &CancellationToken::new(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Network(_)));
    assert!(!err.to_string().contains("secretprojectkey"));
}
