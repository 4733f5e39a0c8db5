//! `FileSearchClient` - file-search endpoint client implementation.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::Client;
use tokio::sync::Mutex;
use tracing::instrument;
use url::Url;

use super::api::LocalFileSearchApi;
use super::types::FileSearchItem;
use crate::rate_limiter::RateLimiter;

/// Default search endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://cbx.xmenace.workers.dev/0:search";

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// File-search endpoint client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct FileSearchClient {
    /// HTTP client (carries the request timeout).
    http_client: Client,
    /// Full endpoint URL; the query is appended as `?q=`.
    endpoint: Url,
    /// Rate limiter.
    rate_limiter: Arc<Mutex<RateLimiter>>,
}

/// Builder for `FileSearchClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct FileSearchClientBuilder {
    endpoint: Option<Url>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    min_interval: Option<Duration>,
}

impl FileSearchClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            endpoint: None,
            user_agent: None,
            timeout: None,
            min_interval: None,
        }
    }

    /// Overrides the endpoint URL.
    #[must_use]
    pub fn endpoint(mut self, url: Url) -> Self {
        self.endpoint = Some(url);
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the per-request timeout (default: 15s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the minimum request interval (default: 500ms).
    #[must_use]
    pub const fn min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = Some(interval);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<FileSearchClient> {
        let user_agent = self.user_agent.context("user_agent is required")?;

        let endpoint = match self.endpoint {
            Some(url) => url,
            None => Url::parse(DEFAULT_ENDPOINT).context("invalid default endpoint URL")?,
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        let rate_limiter = RateLimiter::new(
            self.min_interval
                .unwrap_or(RateLimiter::FILE_SEARCH_INTERVAL),
        );

        Ok(FileSearchClient {
            http_client,
            endpoint,
            rate_limiter: Arc::new(Mutex::new(rate_limiter)),
        })
    }
}

impl FileSearchClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> FileSearchClientBuilder {
        FileSearchClientBuilder::new()
    }

    /// Returns the endpoint this client queries.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl LocalFileSearchApi for FileSearchClient {
    #[instrument(skip_all)]
    async fn search(&self, query: &str) -> Result<Vec<FileSearchItem>> {
        self.rate_limiter.lock().await.wait().await;

        let request = self
            .http_client
            .get(self.endpoint.clone())
            .query(&[("q", query)])
            .build()
            .context("failed to build file search request")?;

        tracing::debug!(url = %request.url(), "File search request");

        let response = self
            .http_client
            .execute(request)
            .await
            .context("file search request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("file search error (HTTP {status})");
        }

        let body = response
            .text()
            .await
            .context("failed to read file search response body")?;
        serde_json::from_str(&body).context("failed to decode file search response")
    }
}
