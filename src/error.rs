//! Error types for sitecheck
//!
//! This module provides the error type hierarchy using `thiserror`.
//! Only [`FetchError`] is fatal to a check; the pipeline converts it into a
//! failed [`CheckResult`](crate::check::CheckResult) so callers of
//! [`CheckPipeline::check`](crate::check::CheckPipeline::check) never see it.

use thiserror::Error;

/// The main error type for sitecheck operations
#[derive(Error, Debug)]
pub enum Error {
    /// Transport errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Field extraction errors
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Storage collaborator errors
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Submitted URL rejected
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// No URL record with this id
    #[error("URL not found: {0}")]
    UrlNotFound(i64),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Transport failure taxonomy for a single fetch.
///
/// The display strings are the fixed, user-facing messages that end up in
/// the check's error log.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// No connection could be established (DNS, refusal, timeout before a response)
    #[error("Could not connect to the site")]
    Connect(String),

    /// Connection established but the HTTP exchange failed
    #[error("The request to the site failed")]
    Request(String),

    /// Any other transport-level failure
    #[error("An error occurred while fetching the site")]
    Transport(String),

    /// The HTTP client could not be constructed
    #[error("HTTP client setup failed: {0}")]
    ClientBuild(String),
}

impl FetchError {
    /// Short kind name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Connect(_) => "connect",
            FetchError::Request(_) => "request",
            FetchError::Transport(_) => "transport",
            FetchError::ClientBuild(_) => "client_build",
        }
    }

    /// Underlying transport detail, never shown to users
    pub fn detail(&self) -> &str {
        match self {
            FetchError::Connect(d)
            | FetchError::Request(d)
            | FetchError::Transport(d)
            | FetchError::ClientBuild(d) => d,
        }
    }
}

/// Per-field extraction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// Selector did not compile
    #[error("Invalid selector `{selector}`: {reason}")]
    InvalidSelector {
        /// Selector source text
        selector: String,
        /// Parser message
        reason: String,
    },
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable held an unparseable value
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        /// Variable name
        key: String,
        /// Raw value
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// Field limit too small to hold the ellipsis marker
    #[error("Field limit for {field} must be at least 3, got {limit}")]
    LimitTooSmall {
        /// Field name
        field: String,
        /// Rejected limit
        limit: usize,
    },
}

/// Storage collaborator errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A URL matching this one is already registered
    #[error("The site already exists (id {0})")]
    Duplicate(i64),

    /// Value longer than the column allows
    #[error("Value too long for column {column}: {length} > {max}")]
    ColumnTooLong {
        /// Column name
        column: String,
        /// Actual length in characters
        length: usize,
        /// Column width
        max: usize,
    },

    /// Referenced URL does not exist
    #[error("Unknown url id {0}")]
    UnknownUrl(i64),
}

/// Submitted URL validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Nothing submitted
    #[error("URL cannot be empty")]
    Empty,

    /// Longer than the storable name
    #[error("URL exceeds maximum length of {0} characters")]
    TooLong(usize),

    /// Not an absolute http(s) URL
    #[error("Invalid URL: {0}")]
    Invalid(String),
}

/// Result type alias for sitecheck operations
pub type Result<T> = std::result::Result<T, Error>;
