//! Check orchestration
//!
//! `START -> FETCHING -> {FAILED | EXTRACTING} -> NORMALIZING -> DONE`
//!
//! Every call to [`CheckPipeline::check`] owns a fresh [`ErrorLog`]; the
//! pipeline itself only holds immutable configuration and the shared HTTP
//! client, so one instance can serve concurrent checks.

use crate::check::result::{CheckResult, ErrorLog};
use crate::config::CheckConfig;
use crate::error::FetchError;
use crate::extraction::SeoExtractor;
use crate::fetch::{HttpFetcher, PageFetcher};
use std::fmt;
use tracing::{debug, info, instrument, warn};

/// Stage of a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStage {
    /// Waiting for the page
    Fetching,
    /// Fetch failed; terminal
    Failed,
    /// Running field queries
    Extracting,
    /// Enforcing field limits
    Normalizing,
    /// Result assembled; terminal
    Done,
}

impl fmt::Display for CheckStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckStage::Fetching => "fetching",
            CheckStage::Failed => "failed",
            CheckStage::Extracting => "extracting",
            CheckStage::Normalizing => "normalizing",
            CheckStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Fetch, extract and normalize one URL
pub struct CheckPipeline<F = HttpFetcher> {
    fetcher: F,
    extractor: SeoExtractor,
    config: CheckConfig,
}

impl CheckPipeline<HttpFetcher> {
    /// Pipeline backed by a `reqwest` client
    pub fn new(config: CheckConfig) -> Result<Self, FetchError> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::with_fetcher(fetcher, config))
    }
}

impl<F: PageFetcher> CheckPipeline<F> {
    /// Pipeline over any fetcher
    pub fn with_fetcher(fetcher: F, config: CheckConfig) -> Self {
        Self {
            fetcher,
            extractor: SeoExtractor::default(),
            config,
        }
    }

    /// Replace the field extractor
    pub fn with_extractor(mut self, extractor: SeoExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Run one check.
    ///
    /// Never fails: transport errors become a failed [`CheckResult`] with
    /// exactly one log entry, extraction errors become log entries.
    #[instrument(skip(self))]
    pub async fn check(&self, url: &str) -> (CheckResult, ErrorLog) {
        let mut errors = ErrorLog::new();

        debug!(stage = %CheckStage::Fetching, "Check started");
        let page = match self.fetcher.fetch(url).await {
            Ok(page) => page,
            Err(e) => {
                warn!(
                    stage = %CheckStage::Failed,
                    kind = e.kind(),
                    detail = e.detail(),
                    "Fetch failed"
                );
                errors.push(e.to_string());
                return (CheckResult::failed(self.config.failure_status), errors);
            }
        };

        debug!(stage = %CheckStage::Extracting, status_code = page.status_code);
        let fields = self
            .extractor
            .extract(&page.body, page.content_type.as_deref(), &mut errors);

        debug!(stage = %CheckStage::Normalizing);
        let result =
            CheckResult::completed(page.status_code, fields, &self.config.field_limits);
        info!(
            stage = %CheckStage::Done,
            status_code = result.status_code(),
            warnings = errors.len(),
            "Check finished"
        );
        (result, errors)
    }
}
