use crate::error::{Result, SourceError};
use reqwest::{Client, RequestBuilder, StatusCode};
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = "urlsift/0.1 (https://github.com/trapdoorsec/urlsift)";

/// Build the HTTP client shared by every source.
///
/// With no timeout a slow upstream blocks its fetch indefinitely.
pub fn build_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder()
        .user_agent(USER_AGENT)
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .redirect(reqwest::redirect::Policy::limited(5));

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout).connect_timeout(timeout);
    }

    Ok(builder.build()?)
}

/// A response that has been read in full, whatever its status.
pub(crate) struct Reply {
    pub status: StatusCode,
    pub url: String,
    pub body: String,
}

impl Reply {
    /// The body of a 2xx reply; anything else becomes `SourceError::Status`.
    pub fn into_text(self) -> Result<String> {
        if !self.status.is_success() {
            return Err(SourceError::Status {
                status: self.status.as_u16(),
                url: self.url,
            });
        }
        Ok(self.body)
    }
}

/// Send a request and read the body without judging the status.
pub(crate) async fn fetch_reply(request: RequestBuilder) -> Result<Reply> {
    let response = request.send().await.map_err(|e| e.without_url())?;
    let status = response.status();
    let url = strip_query(response.url().as_str());
    debug!("{} -> {}", url, status);

    let body = response.text().await.map_err(|e| e.without_url())?;
    Ok(Reply { status, url, body })
}

/// Send a request and return the body, treating any non-2xx status as an error.
pub(crate) async fn fetch_text(request: RequestBuilder) -> Result<String> {
    fetch_reply(request).await?.into_text()
}

// Query strings can carry API keys.
fn strip_query(url: &str) -> String {
    match url.split_once('?') {
        Some((base, _)) => base.to_string(),
        None => url.to_string(),
    }
}
