//! Site check pipeline
//!
//! This module composes fetching, extraction and normalization into a
//! single check producing an immutable [`CheckResult`] and an [`ErrorLog`].

pub mod pipeline;
pub mod result;

pub use pipeline::{CheckPipeline, CheckStage};
pub use result::{CheckResult, ErrorLog};
