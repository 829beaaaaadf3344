//! Shodan host search. Needs an API key.
//!
//! Shodan answers with hosts, not URLs, so the tokens this source yields are
//! IP address strings.

use crate::error::Result;
use crate::http::fetch_text;
use crate::source::{Query, Source};
use futures::future::{BoxFuture, FutureExt};
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.shodan.io";

#[derive(Deserialize)]
struct HostSearchResponse {
    #[serde(default)]
    matches: Vec<HostMatch>,
}

#[derive(Deserialize)]
struct HostMatch {
    ip_str: String,
}

pub struct Shodan {
    base_url: String,
    api_key: String,
}

impl Shodan {
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

pub fn parse_host_matches(body: &str) -> Result<Vec<String>> {
    let response: HostSearchResponse = serde_json::from_str(body)?;
    Ok(response.matches.into_iter().map(|m| m.ip_str).collect())
}

impl Source for Shodan {
    fn name(&self) -> &'static str {
        "shodan"
    }

    fn fetch_urls<'a>(
        &'a self,
        client: &'a Client,
        query: &'a Query,
    ) -> BoxFuture<'a, Result<Vec<String>>> {
        async move {
            let endpoint = format!(
                "{}/shodan/host/search",
                self.base_url.trim_end_matches('/')
            );
            let request = client.get(endpoint).query(&[
                ("query", query.domain.as_str()),
                ("key", self.api_key.as_str()),
            ]);
            let body = fetch_text(request).await?;
            parse_host_matches(&body)
        }
        .boxed()
    }
}
