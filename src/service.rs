//! URL registration and check service
//!
//! Glues the pipeline to its collaborators: validates and registers URLs,
//! runs checks against registered URLs, persists the result and turns the
//! outcome into user-facing notices.

use crate::check::{CheckPipeline, CheckResult, ErrorLog};
use crate::error::{Error, Result, StoreError};
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::store::{CheckRepository, UrlRepository};
use crate::validate::UrlValidator;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    /// Operation succeeded
    Success,
    /// Operation failed
    Danger,
    /// Non-blocking problem
    Warning,
}

/// A message for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity
    pub level: NoticeLevel,
    /// Text
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Outcome of registering a URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddUrlOutcome {
    /// Id of the new or already registered record
    pub url_id: i64,
    /// False when the URL matched an existing record
    pub created: bool,
    /// Messages for the user
    pub notices: Vec<Notice>,
}

/// Outcome of checking a registered URL
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    /// Checked URL id
    pub url_id: i64,
    /// Persisted check id, `None` when saving failed
    pub check_id: Option<i64>,
    /// The check itself
    pub result: CheckResult,
    /// Non-fatal problems raised during the check
    pub errors: ErrorLog,
    /// Messages for the user: one success/failure notice, then one warning per error
    pub notices: Vec<Notice>,
}

/// Registration and check service over a store
pub struct SiteChecker<S, F = HttpFetcher> {
    store: S,
    pipeline: CheckPipeline<F>,
}

impl<S, F> SiteChecker<S, F>
where
    S: UrlRepository + CheckRepository,
    F: PageFetcher,
{
    /// Create a service
    pub fn new(store: S, pipeline: CheckPipeline<F>) -> Self {
        Self { store, pipeline }
    }

    /// Underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate and register a URL.
    ///
    /// A URL matching an existing record is not an error: the existing id is
    /// returned with `created == false`.
    #[instrument(skip(self))]
    pub fn add_url(&self, raw: &str) -> Result<AddUrlOutcome> {
        let url = UrlValidator::validate(raw)?;
        let name = raw.trim();

        match self.store.create_url(name) {
            Ok(url_id) => {
                info!(url_id, host = url.host_str(), "Page added");
                Ok(AddUrlOutcome {
                    url_id,
                    created: true,
                    notices: vec![Notice::new(NoticeLevel::Success, "Page added successfully")],
                })
            }
            Err(StoreError::Duplicate(url_id)) => Ok(AddUrlOutcome {
                url_id,
                created: false,
                notices: vec![Notice::new(NoticeLevel::Danger, "Page already exists")],
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Check a registered URL and persist the result.
    ///
    /// Transport failures are not errors here; they come back as a failed
    /// result. Only an unknown `url_id` is.
    #[instrument(skip(self))]
    pub async fn check_url(&self, url_id: i64) -> Result<CheckOutcome> {
        let record = self.store.find_url(url_id).ok_or(Error::UrlNotFound(url_id))?;

        let (result, errors) = self.pipeline.check(&record.name).await;

        let mut notices = Vec::with_capacity(errors.len() + 1);
        let check_id = match self.store.save_check(url_id, &result) {
            Ok(id) => {
                notices.push(Notice::new(NoticeLevel::Success, "Page checked successfully"));
                Some(id)
            }
            Err(e) => {
                warn!(url_id, error = %e, "Could not save check");
                notices.push(Notice::new(
                    NoticeLevel::Danger,
                    format!("Error while checking: {e}"),
                ));
                None
            }
        };
        notices.extend(
            errors
                .entries()
                .iter()
                .map(|msg| Notice::new(NoticeLevel::Warning, msg.as_str())),
        );

        Ok(CheckOutcome {
            url_id,
            check_id,
            result,
            errors,
            notices,
        })
    }
}
