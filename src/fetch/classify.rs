//! Transport error classification
//!
//! Maps `reqwest` errors onto the three-way [`FetchError`] taxonomy.

use crate::error::FetchError;

/// Where in the exchange an error surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    /// Sending the request and waiting for response headers
    Send,
    /// Reading the response body
    Body,
}

/// Classify a transport error.
///
/// - connect errors, and timeouts before any response arrived, are `Connect`
/// - a timeout while streaming the body is `Transport`
/// - other failures of the exchange itself (malformed response, body read,
///   decode, redirect loop) are `Request`
/// - everything else is `Transport`
pub fn classify(err: &reqwest::Error, stage: FetchStage) -> FetchError {
    let detail = error_chain(err);

    if err.is_connect() {
        return FetchError::Connect(detail);
    }
    if err.is_timeout() {
        return match stage {
            FetchStage::Send => FetchError::Connect(detail),
            FetchStage::Body => FetchError::Transport(detail),
        };
    }
    if err.is_request() || err.is_body() || err.is_decode() || err.is_redirect() {
        return FetchError::Request(detail);
    }

    FetchError::Transport(detail)
}

/// Flatten an error and its sources into one line
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
