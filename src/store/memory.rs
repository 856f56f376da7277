//! In-memory URL and check store

use crate::check::CheckResult;
use crate::config::{DuplicateMatch, StoreConfig};
use crate::error::StoreError;
use crate::extraction::Field;
use crate::store::{CheckRepository, StoredCheck, UrlRecord, UrlRepository};
use crate::validate::UrlValidator;
use chrono::Utc;
use parking_lot::RwLock;
use tracing::{debug, info};

#[derive(Default)]
struct Tables {
    urls: Vec<UrlRecord>,
    checks: Vec<StoredCheck>,
    next_url_id: i64,
    next_check_id: i64,
}

/// Thread-safe in-memory store
pub struct MemoryStore {
    config: StoreConfig,
    tables: RwLock<Tables>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl MemoryStore {
    /// Create an empty store
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            tables: RwLock::new(Tables {
                next_url_id: 1,
                next_check_id: 1,
                ..Default::default()
            }),
        }
    }

    fn matches(&self, record: &UrlRecord, name: &str) -> bool {
        match self.config.duplicate_match {
            DuplicateMatch::Exact => record.name == name,
            DuplicateMatch::Host => match (
                UrlValidator::extract_host(&record.name),
                UrlValidator::extract_host(name),
            ) {
                (Some(a), Some(b)) => a == b,
                _ => record.name == name,
            },
        }
    }

    fn check_width(column: &str, value: &str, max: usize) -> Result<(), StoreError> {
        let length = value.chars().count();
        if length > max {
            return Err(StoreError::ColumnTooLong {
                column: column.to_string(),
                length,
                max,
            });
        }
        Ok(())
    }
}

impl UrlRepository for MemoryStore {
    fn create_url(&self, name: &str) -> Result<i64, StoreError> {
        Self::check_width("name", name, self.config.max_name_length)?;

        let mut tables = self.tables.write();
        if let Some(existing) = tables.urls.iter().find(|r| self.matches(r, name)) {
            debug!(id = existing.id, "Duplicate url");
            return Err(StoreError::Duplicate(existing.id));
        }

        let id = tables.next_url_id;
        tables.next_url_id += 1;
        tables.urls.push(UrlRecord {
            id,
            name: name.to_string(),
            created_at: Utc::now(),
        });
        info!(id, name, "Url registered");
        Ok(id)
    }

    fn find_url(&self, id: i64) -> Option<UrlRecord> {
        self.tables.read().urls.iter().find(|r| r.id == id).cloned()
    }

    fn list_urls(&self) -> Vec<UrlRecord> {
        let mut urls = self.tables.read().urls.clone();
        urls.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        urls
    }
}

impl CheckRepository for MemoryStore {
    fn save_check(&self, url_id: i64, result: &CheckResult) -> Result<i64, StoreError> {
        for (field, max) in self.config.column_limits.iter() {
            let value = match field {
                Field::H1 => result.h1(),
                Field::Title => result.title(),
                Field::Description => result.description(),
            };
            if let Some(value) = value {
                Self::check_width(field.as_str(), value, max)?;
            }
        }

        let mut tables = self.tables.write();
        if !tables.urls.iter().any(|r| r.id == url_id) {
            return Err(StoreError::UnknownUrl(url_id));
        }

        let id = tables.next_check_id;
        tables.next_check_id += 1;
        tables.checks.push(StoredCheck {
            id,
            url_id,
            result: result.clone(),
        });
        debug!(id, url_id, "Check saved");
        Ok(id)
    }

    fn checks_for(&self, url_id: i64) -> Vec<StoredCheck> {
        let mut checks: Vec<StoredCheck> = self
            .tables
            .read()
            .checks
            .iter()
            .filter(|c| c.url_id == url_id)
            .cloned()
            .collect();
        checks.sort_by(|a, b| {
            b.result
                .created_at()
                .cmp(&a.result.created_at())
                .then(b.id.cmp(&a.id))
        });
        checks
    }
}
