//! sitecheck - On-Demand SEO Site Checks
//!
//! This crate fetches a page under strict timeouts, tolerantly extracts its
//! first `<h1>`, `<title>` and meta description, truncates them to storage
//! limits and produces one immutable check record per run.
//!
//! # Architecture
//!
//! ```text
//! url ──▶ Fetcher ──▶ Extractor ──▶ FieldNormalizer ──▶ CheckResult
//!            │            │
//!            ▼            ▼
//!        FAILED +     ErrorLog
//!        ErrorLog   (per-field)
//! ```
//!
//! Transport failures end the check early with a sentinel status code; a
//! field that cannot be extracted only blanks that field.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sitecheck::{CheckConfig, CheckPipeline};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = CheckPipeline::new(CheckConfig::default())?;
//!     let (result, warnings) = pipeline.check("https://example.com").await;
//!
//!     println!("{} {:?}", result.status_code(), result.title());
//!     for warning in warnings.entries() {
//!         eprintln!("warning: {warning}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Security
//!
//! By default certificate verification is disabled so that sites with
//! self-signed or misconfigured certificates can still be checked. Set
//! [`CheckConfig::accept_invalid_certs`] to `false` (or
//! `SITECHECK_VERIFY_TLS=true`) to verify certificates.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod check;
pub mod config;
pub mod error;
pub mod extraction;
pub mod fetch;
pub mod normalize;
pub mod service;
pub mod store;
pub mod validate;

// Re-exports for convenience
pub use check::{CheckPipeline, CheckResult, ErrorLog};
pub use config::{CheckConfig, FieldLimits, StoreConfig};
pub use error::{Error, Result};
pub use extraction::{Field, SeoExtractor, SeoFields};
pub use fetch::{HttpFetcher, PageFetcher};
pub use normalize::FieldNormalizer;
pub use service::{Notice, NoticeLevel, SiteChecker};
pub use store::MemoryStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
