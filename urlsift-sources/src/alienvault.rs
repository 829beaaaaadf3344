//! AlienVault OTX passive URL list.

use crate::error::Result;
use crate::http::fetch_text;
use crate::source::{Query, Source};
use futures::future::{BoxFuture, FutureExt};
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://otx.alienvault.com";

#[derive(Deserialize)]
struct UrlListResponse {
    #[serde(default)]
    url_list: Vec<UrlEntry>,
}

#[derive(Deserialize)]
struct UrlEntry {
    url: String,
}

pub struct AlienVault {
    base_url: String,
}

impl AlienVault {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, domain: &str) -> String {
        format!(
            "{}/api/v1/indicators/domain/{}/url_list",
            self.base_url.trim_end_matches('/'),
            domain
        )
    }
}

impl Default for AlienVault {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull `url_list[].url` out of an OTX response body.
pub fn parse_url_list(body: &str) -> Result<Vec<String>> {
    let response: UrlListResponse = serde_json::from_str(body)?;
    Ok(response.url_list.into_iter().map(|entry| entry.url).collect())
}

impl Source for AlienVault {
    fn name(&self) -> &'static str {
        "alienvault"
    }

    fn fetch_urls<'a>(
        &'a self,
        client: &'a Client,
        query: &'a Query,
    ) -> BoxFuture<'a, Result<Vec<String>>> {
        async move {
            let body = fetch_text(client.get(self.endpoint(&query.domain))).await?;
            parse_url_list(&body)
        }
        .boxed()
    }
}
