//! Check record and per-check error log

use crate::config::FieldLimits;
use crate::extraction::SeoFields;
use crate::normalize::FieldNormalizer;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one check.
///
/// Either completed (real status code, normalized fields) or failed
/// (sentinel status code, no fields). There is no way to build a mix, and
/// a completed result never holds a field longer than its limit. Results
/// serialize for output but are never read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    status_code: u16,
    h1: Option<String>,
    title: Option<String>,
    description: Option<String>,
    created_at: DateTime<Utc>,
    failed: bool,
}

impl CheckResult {
    /// Successful check stamped now; `fields` are normalized to `limits`
    pub fn completed(status_code: u16, fields: SeoFields, limits: &FieldLimits) -> Self {
        let SeoFields {
            h1,
            title,
            description,
        } = FieldNormalizer::normalize(fields, limits);
        Self {
            status_code,
            h1,
            title,
            description,
            created_at: Utc::now(),
            failed: false,
        }
    }

    /// Failed check stamped now
    pub fn failed(sentinel_status: u16) -> Self {
        Self {
            status_code: sentinel_status,
            h1: None,
            title: None,
            description: None,
            created_at: Utc::now(),
            failed: true,
        }
    }

    /// HTTP status, or the sentinel for failed checks
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// First `<h1>` text
    pub fn h1(&self) -> Option<&str> {
        self.h1.as_deref()
    }

    /// Page title
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Meta description
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// When the pipeline finished
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// True when the fetch did not complete
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Copy of the text fields
    pub fn fields(&self) -> SeoFields {
        SeoFields {
            h1: self.h1.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }
}

/// Ordered, non-fatal messages collected during one check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorLog(Vec<String>);

impl ErrorLog {
    /// Empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.0.push(message.into());
    }

    /// Append all messages of another log, keeping order
    pub fn merge(&mut self, other: ErrorLog) {
        self.0.extend(other.0);
    }

    /// Messages in insertion order
    pub fn entries(&self) -> &[String] {
        &self.0
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nothing was logged
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for ErrorLog {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<ErrorLog> for Vec<String> {
    fn from(log: ErrorLog) -> Self {
        log.0
    }
}
