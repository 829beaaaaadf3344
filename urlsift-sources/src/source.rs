use crate::error::Result;
use crate::outcome::FetchOutcome;
use futures::future::{BoxFuture, FutureExt};
use reqwest::Client;
use std::time::Instant;
use tracing::{info, warn};

/// Per-run request context handed to every source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub domain: String,
    pub include_subdomains: bool,
}

impl Query {
    pub fn new(domain: impl Into<String>, include_subdomains: bool) -> Self {
        Self {
            domain: domain.into().trim().to_string(),
            include_subdomains,
        }
    }

    /// Host pattern for archive indexes: `*.example.com` or `example.com`.
    pub fn host_pattern(&self) -> String {
        if self.include_subdomains {
            format!("*.{}", self.domain)
        } else {
            self.domain.clone()
        }
    }

    /// Host pattern plus a path wildcard, as the CDX-style indexes expect.
    pub fn archive_pattern(&self) -> String {
        format!("{}/*", self.host_pattern())
    }
}

/// One passive URL provider.
pub trait Source: Send + Sync {
    fn name(&self) -> &'static str;

    /// Query the provider and parse its response into URL tokens.
    fn fetch_urls<'a>(
        &'a self,
        client: &'a Client,
        query: &'a Query,
    ) -> BoxFuture<'a, Result<Vec<String>>>;

    /// Run the fetch and fold any error into a `Failure` outcome.
    fn fetch<'a>(&'a self, client: &'a Client, query: &'a Query) -> BoxFuture<'a, FetchOutcome> {
        async move {
            let start = Instant::now();
            match self.fetch_urls(client, query).await {
                Ok(urls) => {
                    info!(
                        source = self.name(),
                        count = urls.len(),
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "source finished"
                    );
                    FetchOutcome::success(self.name(), urls)
                }
                Err(e) => {
                    warn!("Error fetching from {}: {}", self.name(), e);
                    FetchOutcome::failure(self.name(), e.to_string())
                }
            }
        }
        .boxed()
    }
}
