//! # JSON over HTTP
//!
//! The two request primitives every client is built on. Each issues exactly one
//! request, checks the status, and parses the body. There is no retry.
//!
//! Both take a [`CancellationToken`]: a token that is already cancelled means
//! no request is sent, and a token cancelled mid-flight drops the request
//! future and returns [`AppError::Cancelled`].
//!
//! RPC endpoint URLs carry provider keys in their path, so logs and errors
//! only ever name the endpoint's host.

use lib_core::{AppError, Result};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// GET `url` and parse the JSON body.
///
/// Any non-2xx response becomes [`AppError::Http`] whose message embeds the
/// status code and the response body text.
#[tracing::instrument(skip(http, url, cancel), fields(host = %endpoint_host(url)), level = "debug")]
pub async fn fetch_json<T: DeserializeOwned>(
    http: &Client,
    url: &str,
    cancel: &CancellationToken,
) -> Result<T> {
    send_json(http.get(url), cancel).await
}

/// POST `body` as JSON to `url` and parse the JSON response.
#[tracing::instrument(
    skip(http, url, body, cancel),
    fields(host = %endpoint_host(url)),
    level = "debug"
)]
pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
    http: &Client,
    url: &str,
    body: &B,
    cancel: &CancellationToken,
) -> Result<T> {
    send_json(http.post(url).json(body), cancel).await
}

/// Run `fut` unless `cancel` fires first.
pub async fn with_cancel<T, F>(cancel: &CancellationToken, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    if cancel.is_cancelled() {
        return Err(AppError::Cancelled);
    }
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(AppError::Cancelled),
        result = fut => result,
    }
}

/// `host[:port]` of `url`, for logging.
pub fn endpoint_host(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => match (parsed.host_str(), parsed.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => "<no host>".to_string(),
        },
        Err(_) => "<invalid url>".to_string(),
    }
}

async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    cancel: &CancellationToken,
) -> Result<T> {
    let start = std::time::Instant::now();

    let result = with_cancel(cancel, async {
        let response = request.send().await.map_err(|e| {
            let e = e.without_url();
            tracing::error!(error = %e, "Request network error");
            AppError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = status.as_u16(),
                duration_ms = start.elapsed().as_millis(),
                "Request failed with non-success status"
            );
            return Err(AppError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            let e = e.without_url();
            tracing::error!(error = %e, "Response body read error");
            AppError::Network(e.to_string())
        })?;

        serde_json::from_slice::<T>(&bytes).map_err(|e| {
            tracing::error!(error = %e, "Response parse error");
            AppError::Decoding(format!("Invalid response body: {}", e))
        })
    })
    .await;

    match &result {
        Ok(_) => tracing::debug!(
            duration_ms = start.elapsed().as_millis(),
            "Request succeeded"
        ),
        Err(AppError::Cancelled) => tracing::debug!("Request cancelled"),
        Err(_) => {}
    }

    result
}
