//! Page fetching
//!
//! This module performs the single bounded GET of a check and classifies
//! transport failures.

pub mod classify;
pub mod client;

pub use classify::{classify, FetchStage};
pub use client::{FetchedPage, HttpFetcher, PageFetcher, FALLBACK_STATUS};
