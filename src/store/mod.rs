//! Storage collaborators
//!
//! The check pipeline never persists anything itself. These traits are the
//! contracts it hands results to; [`MemoryStore`] implements them in memory.

pub mod memory;

use crate::check::CheckResult;
use crate::error::StoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use memory::MemoryStore;

/// A registered URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    /// Record id
    pub id: i64,
    /// URL as submitted
    pub name: String,
    /// Registration time
    pub created_at: DateTime<Utc>,
}

/// A persisted check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredCheck {
    /// Check id
    pub id: i64,
    /// Owning URL id
    pub url_id: i64,
    /// The check itself
    pub result: CheckResult,
}

/// URL lookup and creation
pub trait UrlRepository: Send + Sync {
    /// Register a URL; `StoreError::Duplicate` carries the existing id
    fn create_url(&self, name: &str) -> Result<i64, StoreError>;

    /// Lookup by id
    fn find_url(&self, id: i64) -> Option<UrlRecord>;

    /// All URLs, newest first
    fn list_urls(&self) -> Vec<UrlRecord>;
}

/// Check persistence
pub trait CheckRepository: Send + Sync {
    /// Persist a check for a URL; fails if a field exceeds its column width
    fn save_check(&self, url_id: i64, result: &CheckResult) -> Result<i64, StoreError>;

    /// All checks of a URL, newest first
    fn checks_for(&self, url_id: i64) -> Vec<StoredCheck>;

    /// Most recent check of a URL
    fn last_check(&self, url_id: i64) -> Option<StoredCheck> {
        self.checks_for(url_id).into_iter().next()
    }
}
