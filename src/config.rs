//! Check configuration
//!
//! All settings have defaults matching the reference checker (5s timeouts,
//! certificate verification off, sentinel status 500, 255-char fields) and
//! can be overridden from the environment:
//!
//! - `SITECHECK_CONNECT_TIMEOUT_SECS`: connect timeout (default: 5)
//! - `SITECHECK_TIMEOUT_SECS`: overall request timeout (default: 5)
//! - `SITECHECK_VERIFY_TLS`: set to "true" to verify certificates (default: false)
//! - `SITECHECK_MAX_REDIRECTS`: redirect hops to follow (default: 5)
//! - `SITECHECK_USER_AGENT`: User-Agent header
//! - `SITECHECK_FAILURE_STATUS`: status recorded for failed fetches (default: 500)
//! - `SITECHECK_MAX_FIELD_LENGTH`: limit applied to h1/title/description (default: 255)
//! - `SITECHECK_DUPLICATE_MATCH`: `host` or `exact` (default: host)

use crate::error::ConfigError;
use crate::extraction::Field;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default storage width for every text field
pub const DEFAULT_MAX_FIELD_LENGTH: usize = 255;

/// Default status code recorded when the fetch did not complete
pub const DEFAULT_FAILURE_STATUS: u16 = 500;

/// Default User-Agent
pub const DEFAULT_USER_AGENT: &str = concat!("sitecheck/", env!("CARGO_PKG_VERSION"));

/// Maximum length per extracted field.
///
/// Fields without an entry are never truncated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldLimits(BTreeMap<Field, usize>);

impl Default for FieldLimits {
    fn default() -> Self {
        Self::uniform(DEFAULT_MAX_FIELD_LENGTH)
    }
}

impl FieldLimits {
    /// No limits at all
    pub fn none() -> Self {
        Self(BTreeMap::new())
    }

    /// Same limit for every field
    pub fn uniform(max: usize) -> Self {
        Self(Field::ALL.iter().map(|f| (*f, max)).collect())
    }

    /// Set the limit for one field.
    ///
    /// Limits below 3 cannot hold the `"..."` marker and are rejected.
    pub fn with(mut self, field: Field, max: usize) -> Result<Self, ConfigError> {
        if max < 3 {
            return Err(ConfigError::LimitTooSmall {
                field: field.to_string(),
                limit: max,
            });
        }
        self.0.insert(field, max);
        Ok(self)
    }

    /// Limit for a field, if any
    pub fn get(&self, field: Field) -> Option<usize> {
        self.0.get(&field).copied()
    }

    /// Iterate over configured limits
    pub fn iter(&self) -> impl Iterator<Item = (Field, usize)> + '_ {
        self.0.iter().map(|(f, m)| (*f, *m))
    }
}

/// Configuration for the check pipeline
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Time allowed to establish the connection (default: 5s)
    pub connect_timeout: Duration,
    /// Overall time allowed for the whole request (default: 5s)
    pub timeout: Duration,
    /// Accept self-signed or otherwise invalid certificates (default: true).
    ///
    /// This disables TLS verification and is a security-relevant deviation
    /// from client defaults.
    pub accept_invalid_certs: bool,
    /// Redirect hops to follow (default: 5)
    pub max_redirects: usize,
    /// User-Agent header
    pub user_agent: String,
    /// Status code recorded for fetches that did not complete (default: 500)
    pub failure_status: u16,
    /// Per-field length limits
    pub field_limits: FieldLimits,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            timeout: Duration::from_secs(5),
            accept_invalid_certs: true,
            max_redirects: 5,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            failure_status: DEFAULT_FAILURE_STATUS,
            field_limits: FieldLimits::default(),
        }
    }
}

impl CheckConfig {
    /// Create a new config builder
    pub fn builder() -> CheckConfigBuilder {
        CheckConfigBuilder::default()
    }

    /// Load from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(secs) = parse_var::<u64, _>(&lookup, "SITECHECK_CONNECT_TIMEOUT_SECS")? {
            config.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "SITECHECK_TIMEOUT_SECS")? {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(verify) = lookup("SITECHECK_VERIFY_TLS") {
            config.accept_invalid_certs = !parse_bool("SITECHECK_VERIFY_TLS", &verify)?;
        }
        if let Some(hops) = parse_var::<usize, _>(&lookup, "SITECHECK_MAX_REDIRECTS")? {
            config.max_redirects = hops;
        }
        if let Some(ua) = lookup("SITECHECK_USER_AGENT").filter(|v| !v.trim().is_empty()) {
            config.user_agent = ua;
        }
        if let Some(status) = parse_var::<u16, _>(&lookup, "SITECHECK_FAILURE_STATUS")? {
            config.failure_status = status;
        }
        if let Some(max) = parse_var::<usize, _>(&lookup, "SITECHECK_MAX_FIELD_LENGTH")? {
            let mut limits = FieldLimits::none();
            for field in Field::ALL {
                limits = limits.with(field, max)?;
            }
            config.field_limits = limits;
        }

        Ok(config)
    }
}

/// Builder for CheckConfig
#[derive(Default)]
pub struct CheckConfigBuilder {
    config: CheckConfig,
}

impl CheckConfigBuilder {
    /// Set connect timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set overall request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Enable/disable acceptance of invalid certificates
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.config.accept_invalid_certs = accept;
        self
    }

    /// Set redirect limit
    pub fn max_redirects(mut self, hops: usize) -> Self {
        self.config.max_redirects = hops;
        self
    }

    /// Set user agent
    pub fn user_agent<S: Into<String>>(mut self, ua: S) -> Self {
        self.config.user_agent = ua.into();
        self
    }

    /// Set the failure sentinel status
    pub fn failure_status(mut self, status: u16) -> Self {
        self.config.failure_status = status;
        self
    }

    /// Replace field limits
    pub fn field_limits(mut self, limits: FieldLimits) -> Self {
        self.config.field_limits = limits;
        self
    }

    /// Build the config
    pub fn build(self) -> CheckConfig {
        self.config
    }
}

/// How a newly submitted URL is matched against registered ones
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateMatch {
    /// Same host means same site
    #[default]
    Host,
    /// Only the identical string is a duplicate
    Exact,
}

impl FromStr for DuplicateMatch {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "host" => Ok(DuplicateMatch::Host),
            "exact" => Ok(DuplicateMatch::Exact),
            other => Err(ConfigError::InvalidValue {
                key: "SITECHECK_DUPLICATE_MATCH".to_string(),
                value: other.to_string(),
                reason: "expected `host` or `exact`".to_string(),
            }),
        }
    }
}

/// Configuration for the storage collaborator
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Duplicate detection policy
    pub duplicate_match: DuplicateMatch,
    /// Maximum stored length of a URL name
    pub max_name_length: usize,
    /// Column widths for check text fields
    pub column_limits: FieldLimits,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            duplicate_match: DuplicateMatch::default(),
            max_name_length: DEFAULT_MAX_FIELD_LENGTH,
            column_limits: FieldLimits::default(),
        }
    }
}

impl StoreConfig {
    /// Load from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup("SITECHECK_DUPLICATE_MATCH") {
            config.duplicate_match = raw.parse()?;
        }
        Ok(config)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw.clone(),
                reason: e.to_string(),
            }),
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}
