//! Error type shared by the plain REST content clients (Wikipedia, YouTube).
//!
//! The OpenAI client keeps its own error type because it understands the
//! OpenAI error envelope; these upstreams only get a status and a truncated body.

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid response JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("upstream returned error: status={status} body={body}")]
    Upstream { status: StatusCode, body: String },

    #[error("not configured: {0}")]
    NotConfigured(&'static str),
}
