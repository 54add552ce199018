use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

use super::SignalSource;
use crate::fetch::{HttpClient, fetch_json};

/// A signal source that reads an already-normalized JSON array of records
/// from a URL.
pub struct JsonFeed<C, T> {
    name: &'static str,
    url: String,
    client: C,
    _record: PhantomData<fn() -> T>,
}

impl<C, T> JsonFeed<C, T> {
    pub fn new(name: &'static str, url: &str, client: C) -> Self {
        Self {
            name,
            url: url.to_string(),
            client,
            _record: PhantomData,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl<C, T> SignalSource for JsonFeed<C, T>
where
    C: HttpClient,
    T: DeserializeOwned + Send + 'static,
{
    type Record = T;

    fn name(&self) -> &'static str {
        self.name
    }

    #[tracing::instrument(skip(self), fields(source = self.name, url = %self.url))]
    async fn fetch(&self) -> Result<Vec<T>> {
        fetch_json(&self.client, &self.url)
            .await
            .with_context(|| format!("{} feed unavailable", self.name))
    }
}
