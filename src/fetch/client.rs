use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{Method, Request, Response};

/// Executes HTTP requests on behalf of the JSON signal feeds.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;

    /// GETs `url` asking for JSON, failing on non-success status codes.
    async fn get_json(&self, url: &str) -> anyhow::Result<Response> {
        let mut req = Request::new(Method::GET, url.parse()?);
        req.headers_mut()
            .insert(ACCEPT, HeaderValue::from_static("application/json"));

        Ok(self.execute(req).await?.error_for_status()?)
    }
}
