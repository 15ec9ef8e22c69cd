//! Minimal MediaWiki client: find the best-matching article for a topic and
//! return its plain-text introduction.
//!
//! One request does both steps by using `generator=search` with `prop=extracts`.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::ApiError;
use crate::http::{parse_json_response, DEFAULT_MAX_ERROR_BODY_BYTES};

#[derive(Clone, Debug)]
pub struct WikipediaClientConfig {
    /// Full URL of the `api.php` endpoint.
    pub api_url: String,
    pub timeout: Duration,
}

impl WikipediaClientConfig {
    pub fn from_env() -> Self {
        let api_url = std::env::var("WIKIPEDIA_API_URL")
            .unwrap_or_else(|_| "https://en.wikipedia.org/w/api.php".to_string());
        let timeout = std::env::var("WIKIPEDIA_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(15));
        Self { api_url, timeout }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikipediaPage {
    pub title: String,
    pub extract: String,
}

impl WikipediaPage {
    /// Render as `Page: ..\nSummary: ..`, cut to at most `max_chars` characters.
    pub fn to_summary(&self, max_chars: usize) -> String {
        let full = format!("Page: {}\nSummary: {}", self.title, self.extract.trim());
        truncate_chars(&full, max_chars)
    }
}

fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

#[derive(Clone)]
pub struct WikipediaClient {
    config: WikipediaClientConfig,
    http: reqwest::Client,
}

impl WikipediaClient {
    pub fn new(config: WikipediaClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("chitti/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { config, http })
    }

    /// Returns `Ok(None)` when the search matched no article.
    pub async fn top_page(&self, topic: &str) -> Result<Option<WikipediaPage>, ApiError> {
        let resp = self
            .http
            .get(&self.config.api_url)
            .timeout(self.config.timeout)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("formatversion", "2"),
                ("generator", "search"),
                ("gsrsearch", topic),
                ("gsrlimit", "1"),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("redirects", "1"),
            ])
            .send()
            .await?;

        let body: QueryResponse = parse_json_response(resp, DEFAULT_MAX_ERROR_BODY_BYTES).await?;
        let page = body
            .query
            .and_then(|q| q.pages.into_iter().min_by_key(|p| p.index.unwrap_or(u32::MAX)))
            .map(|p| WikipediaPage {
                title: p.title,
                extract: p.extract.unwrap_or_default(),
            });
        debug!(topic, found = page.is_some(), "wikipedia search complete");
        Ok(page)
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: Option<QueryPages>,
}

#[derive(Debug, Deserialize)]
struct QueryPages {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: String,
    index: Option<u32>,
    extract: Option<String>,
}
