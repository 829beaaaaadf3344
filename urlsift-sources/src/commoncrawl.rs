//! Common Crawl CDX index.
//!
//! Common Crawl publishes one index per crawl, so a fetch is two requests:
//! scrape the index listing for the newest `CC-MAIN-YYYY-WW` collection, then
//! query that collection. A listing with no recognisable collection fails the
//! source without issuing the second request.

use crate::error::{Result, SourceError};
use crate::http::{fetch_reply, fetch_text};
use crate::source::{Query, Source};
use futures::future::{BoxFuture, FutureExt};
use regex::Regex;
use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use serde::Deserialize;
use std::sync::LazyLock;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://index.commoncrawl.org";

// The index answers 404 with this message when nothing was captured.
const NO_CAPTURES: &str = "No Captures found";

static COLLECTION_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"CC-MAIN-\d{4}-\d{2}").expect("valid collection regex"));

#[derive(Deserialize)]
struct CaptureRecord {
    url: String,
}

pub struct CommonCrawl {
    base_url: String,
}

impl CommonCrawl {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    async fn discover_collection(&self, client: &Client) -> Result<String> {
        let listing = fetch_text(client.get(format!("{}/", self.base()))).await?;
        latest_collection(&listing)
    }
}

impl Default for CommonCrawl {
    fn default() -> Self {
        Self::new()
    }
}

/// Find the greatest `CC-MAIN-*` collection id linked from the index listing.
pub fn latest_collection(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let link_selector = Selector::parse("a[href]")
        .map_err(|e| SourceError::Parse(format!("bad selector: {:?}", e)))?;

    document
        .select(&link_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| COLLECTION_ID.find(href))
        .map(|m| m.as_str().to_string())
        .max()
        .ok_or_else(|| {
            SourceError::Discovery("no CC-MAIN collection linked from index".to_string())
        })
}

/// Whether a reply is the index's "nothing archived" answer rather than a real
/// failure. Other 404s, such as a missing collection, stay errors.
pub fn is_no_captures(status: StatusCode, body: &str) -> bool {
    status == StatusCode::NOT_FOUND && body.contains(NO_CAPTURES)
}

/// Parse newline-delimited capture records, keeping each record's `url`.
pub fn parse_captures(body: &str) -> Result<Vec<String>> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| -> Result<String> {
            let record: CaptureRecord = serde_json::from_str(line)?;
            Ok(record.url)
        })
        .collect()
}

impl Source for CommonCrawl {
    fn name(&self) -> &'static str {
        "commoncrawl"
    }

    fn fetch_urls<'a>(
        &'a self,
        client: &'a Client,
        query: &'a Query,
    ) -> BoxFuture<'a, Result<Vec<String>>> {
        async move {
            let collection = self.discover_collection(client).await?;
            debug!("Using Common Crawl collection {}", collection);

            let request = client
                .get(format!("{}/{}-index", self.base(), collection))
                .query(&[
                    ("url", query.archive_pattern().as_str()),
                    ("output", "json"),
                    ("fl", "url"),
                ]);

            let reply = fetch_reply(request).await?;
            if is_no_captures(reply.status, &reply.body) {
                debug!("No captures in {}", collection);
                return Ok(Vec::new());
            }
            parse_captures(&reply.into_text()?)
        }
        .boxed()
    }
}
