//! urlscan.io search API. Needs an API key.

use crate::error::Result;
use crate::http::fetch_text;
use crate::source::{Query, Source};
use futures::future::{BoxFuture, FutureExt};
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://urlscan.io";

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Deserialize)]
struct SearchResult {
    page: Option<Page>,
}

#[derive(Deserialize)]
struct Page {
    url: Option<String>,
}

pub struct UrlScan {
    base_url: String,
    api_key: String,
}

impl UrlScan {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

/// Pull `results[].page.url`, skipping results that carry no page URL.
pub fn parse_search_results(body: &str) -> Result<Vec<String>> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response
        .results
        .into_iter()
        .filter_map(|result| result.page.and_then(|page| page.url))
        .collect())
}

impl Source for UrlScan {
    fn name(&self) -> &'static str {
        "urlscan"
    }

    fn fetch_urls<'a>(
        &'a self,
        client: &'a Client,
        query: &'a Query,
    ) -> BoxFuture<'a, Result<Vec<String>>> {
        async move {
            let endpoint = format!("{}/api/v1/search/", self.base_url.trim_end_matches('/'));
            let request = client
                .get(endpoint)
                .header("API-Key", &self.api_key)
                .query(&[("q", query.domain.as_str())]);
            let body = fetch_text(request).await?;
            parse_search_results(&body)
        }
        .boxed()
    }
}
