//! Wayback Machine CDX index.

use crate::error::Result;
use crate::http::fetch_text;
use crate::source::{Query, Source};
use futures::future::{BoxFuture, FutureExt};
use reqwest::Client;

pub const DEFAULT_BASE_URL: &str = "http://web.archive.org";

pub struct Wayback {
    base_url: String,
}

impl Wayback {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for Wayback {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse CDX `output=json` rows. The first row is the column header.
pub fn parse_cdx_rows(body: &str) -> Result<Vec<String>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let rows: Vec<Vec<String>> = serde_json::from_str(body)?;
    Ok(rows
        .into_iter()
        .skip(1)
        .filter_map(|row| row.into_iter().next())
        .collect())
}

impl Source for Wayback {
    fn name(&self) -> &'static str {
        "wayback"
    }

    fn fetch_urls<'a>(
        &'a self,
        client: &'a Client,
        query: &'a Query,
    ) -> BoxFuture<'a, Result<Vec<String>>> {
        async move {
            let endpoint = format!("{}/cdx/search/cdx", self.base_url.trim_end_matches('/'));
            let request = client.get(endpoint).query(&[
                ("url", query.archive_pattern().as_str()),
                ("output", "json"),
                ("fl", "original"),
                ("filter", "statuscode:200"),
            ]);
            let body = fetch_text(request).await?;
            parse_cdx_rows(&body)
        }
        .boxed()
    }
}
