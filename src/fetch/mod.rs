mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::debug;

/// GETs `url` and decodes the body as JSON.
pub async fn fetch_json<C: HttpClient, T: DeserializeOwned>(client: &C, url: &str) -> Result<T> {
    let body = client.get_json(url).await?.bytes().await?;
    debug!(url, bytes = body.len(), "JSON body received");

    serde_json::from_slice(&body).with_context(|| format!("invalid JSON from {url}"))
}
