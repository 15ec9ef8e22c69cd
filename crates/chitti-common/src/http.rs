use serde::Deserialize;
use tracing::warn;

use crate::error::ApiError;

pub(crate) const DEFAULT_MAX_ERROR_BODY_BYTES: usize = 8 * 1024;

/// Whole response body as text, for error reporting.
pub(crate) async fn read_error_text(resp: reqwest::Response) -> String {
    match resp.bytes().await {
        Ok(b) => String::from_utf8_lossy(&b).into_owned(),
        Err(e) => {
            warn!(error = %e, "failed to read upstream error body");
            "<failed to read error body>".to_string()
        }
    }
}

/// Cut `text` to at most `max_bytes`, backing off to a char boundary.
pub(crate) fn limit_text(mut text: String, max_bytes: usize) -> String {
    if text.len() > max_bytes {
        let mut end = max_bytes;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
    }
    text
}

/// Read at most `max_bytes` of a response body as text. Used for error bodies,
/// which can be arbitrarily large HTML pages.
pub(crate) async fn read_limited_text(resp: reqwest::Response, max_bytes: usize) -> String {
    limit_text(read_error_text(resp).await, max_bytes)
}

pub(crate) async fn parse_json_response<T: for<'de> Deserialize<'de>>(
    resp: reqwest::Response,
    max_error_body_bytes: usize,
) -> Result<T, ApiError> {
    let status = resp.status();
    if status.is_success() {
        let bytes = resp.bytes().await?;
        return Ok(serde_json::from_slice::<T>(&bytes)?);
    }
    let body = read_limited_text(resp, max_error_body_bytes).await;
    Err(ApiError::Upstream { status, body })
}
