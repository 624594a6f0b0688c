//! Error taxonomy for the watcher.
//!
//! Startup problems are [`ConfigError`] and abort the process. Everything that
//! can go wrong inside one poll cycle is a [`CycleError`]; those are recovered
//! by the poller and never reach the scheduler.

use std::error::Error as _;

use thiserror::Error;

/// Fatal startup error raised by the configuration gate.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required setting is absent or blank
    #[error("{0} must be set")]
    Missing(&'static str),

    /// A setting cannot be used as an HTTP header value
    #[error("{name} is not a valid header value")]
    InvalidHeader {
        name: &'static str,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },

    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Transient failure of a single poll cycle.
#[derive(Debug, Error)]
pub enum CycleError {
    /// Network failure or request timeout
    #[error("request to catalog API failed ({}): {}", request_failure_kind(.0), error_chain(.0))]
    Request(#[from] reqwest::Error),

    /// Catalog answered with a non-success status
    #[error("catalog API returned an error: {status} {reason}")]
    Status { status: u16, reason: String },

    /// Body was not the expected toppings payload
    #[error("invalid catalog response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The watched category is gone; the catalog schema likely changed
    #[error("category \"{0}\" not found in catalog response, the API structure may have changed")]
    CategoryMissing(String),
}

impl CycleError {
    pub fn status(status: reqwest::StatusCode) -> Self {
        CycleError::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
        }
    }
}

fn request_failure_kind(e: &reqwest::Error) -> &'static str {
    if e.is_timeout() {
        "timed out"
    } else if e.is_connect() {
        "connection failed"
    } else if e.is_body() || e.is_decode() {
        "body could not be read"
    } else {
        "request error"
    }
}

/// reqwest's `Display` stops at the outermost error; append every cause.
fn error_chain(e: &reqwest::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
