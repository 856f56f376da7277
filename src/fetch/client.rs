//! Bounded single-shot HTTP fetcher
//!
//! One GET per call, no retries. Every received status code counts as a
//! successful fetch; only transport failures are errors.

use crate::config::CheckConfig;
use crate::error::FetchError;
use crate::fetch::classify::{classify, FetchStage};
use reqwest::redirect::Policy;
use reqwest::Client;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Status recorded when the transport reports none
pub const FALLBACK_STATUS: u16 = 200;

/// A completed fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// HTTP status code
    pub status_code: u16,
    /// Raw response body
    pub body: Vec<u8>,
    /// Content-Type header, if sent; carries the body charset
    pub content_type: Option<String>,
}

impl FetchedPage {
    /// Build a page from a possibly missing status code
    pub fn new(status_code: Option<u16>, body: Vec<u8>) -> Self {
        Self {
            status_code: status_code.filter(|s| *s != 0).unwrap_or(FALLBACK_STATUS),
            body,
            content_type: None,
        }
    }

    /// Attach the response's Content-Type header
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Anything that can fetch a page for a check
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` once
    fn fetch(&self, url: &str) -> impl Future<Output = Result<FetchedPage, FetchError>> + Send;
}

/// `reqwest`-backed fetcher.
///
/// Holds only the immutable client configuration; cheap to share between
/// concurrent checks.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Build a fetcher from check configuration
    pub fn new(config: &CheckConfig) -> Result<Self, FetchError> {
        if config.accept_invalid_certs {
            warn!("TLS certificate verification is disabled for site checks");
        }

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .redirect(Policy::limited(config.max_redirects))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| FetchError::ClientBuild(e.to_string()))?;

        info!(
            connect_timeout_ms = config.connect_timeout.as_millis() as u64,
            timeout_ms = config.timeout.as_millis() as u64,
            "HTTP fetcher ready"
        );

        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }

    /// Overall request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let started = Instant::now();

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify(&e, FetchStage::Send))?;

        let status_code = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let final_url = response.url().clone();

        let body = response
            .bytes()
            .await
            .map_err(|e| classify(&e, FetchStage::Body))?;

        debug!(
            status_code,
            bytes = body.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            final_url = %final_url,
            "Fetched page"
        );

        Ok(FetchedPage {
            content_type,
            ..FetchedPage::new(Some(status_code), body.to_vec())
        })
    }
}
