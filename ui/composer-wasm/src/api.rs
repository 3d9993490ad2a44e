//! Fragment fetching.
//!
//! One thin wrapper over `gloo-net`: a non-success status is a
//! `FragmentError`, the caller decides fallback. `BrowserSource` plugs
//! it into the engine's content-selection state machine.

use async_trait::async_trait;
use gloo_net::http::Request;
use sw_engine::composer::FragmentSource;
use sw_engine::error::FragmentError;

/// Retrieve a URL as text, rejecting on non-success HTTP status
/// (network failure included). No retry.
pub async fn fetch_fragment(url: &str) -> Result<String, FragmentError> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| FragmentError::Network {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    if !resp.ok() {
        return Err(FragmentError::Http {
            status: resp.status(),
            url: url.to_string(),
        });
    }

    resp.text().await.map_err(|e| FragmentError::Network {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

/// Browser-backed [`FragmentSource`].
pub struct BrowserSource;

#[async_trait(?Send)]
impl FragmentSource for BrowserSource {
    async fn fetch(&self, url: &str) -> Result<String, FragmentError> {
        fetch_fragment(url).await
    }
}
