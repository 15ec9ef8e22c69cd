use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::ApiError;
use crate::http::{parse_json_response, DEFAULT_MAX_ERROR_BODY_BYTES};

#[derive(Clone, Debug)]
pub struct YouTubeClientConfig {
    /// Base URL of the Data API, without the trailing resource path.
    pub api_url: String,
    /// `None` leaves the client constructible but every search fails with
    /// [`ApiError::NotConfigured`].
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl YouTubeClientConfig {
    pub fn from_env() -> Self {
        let api_url = std::env::var("YOUTUBE_API_URL")
            .unwrap_or_else(|_| "https://www.googleapis.com/youtube/v3".to_string());
        let api_key = std::env::var("YOUTUBE_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        let timeout = std::env::var("YOUTUBE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(15));
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
            timeout,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YouTubeVideo {
    pub video_id: String,
    pub title: String,
}

impl YouTubeVideo {
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

#[derive(Clone)]
pub struct YouTubeClient {
    config: YouTubeClientConfig,
    http: reqwest::Client,
}

impl YouTubeClient {
    pub fn new(config: YouTubeClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().user_agent("chitti").build()?;
        Ok(Self { config, http })
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// Search for videos, in the order the API ranks them.
    pub async fn search_videos(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<YouTubeVideo>, ApiError> {
        let key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ApiError::NotConfigured("YOUTUBE_API_KEY is not set"))?;

        let url = format!("{}/search", self.config.api_url);
        let max_results = max_results.to_string();
        let resp = self
            .http
            .get(&url)
            .timeout(self.config.timeout)
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("maxResults", max_results.as_str()),
                ("q", query),
                ("key", key),
            ])
            .send()
            .await?;

        let body: SearchListResponse =
            parse_json_response(resp, DEFAULT_MAX_ERROR_BODY_BYTES).await?;
        let videos: Vec<YouTubeVideo> = body
            .items
            .into_iter()
            .filter_map(|item| {
                let video_id = item.id.video_id?;
                Some(YouTubeVideo {
                    video_id,
                    title: unescape_html(&item.snippet.title),
                })
            })
            .collect();
        debug!(query, results = videos.len(), "youtube search complete");
        Ok(videos)
    }
}

/// The Data API returns titles HTML-escaped. Decodes in a single pass, so
/// `&amp;lt;` becomes `&lt;`. Unknown entities are left as written.
fn unescape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let decoded = tail
            .find(';')
            .and_then(|end| decode_entity(&tail[1..end]).map(|c| (c, end)));
        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let digits = name.strip_prefix('#')?;
            let code = match digits.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: ResourceId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
}
