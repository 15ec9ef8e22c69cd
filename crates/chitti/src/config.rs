use std::str::FromStr;

use chitti_common::openai::OpenAiClientConfig;
use chitti_common::wikipedia::WikipediaClientConfig;
use chitti_common::youtube::YouTubeClientConfig;

use crate::error::AppError;
use crate::providers::ImageSettings;

/// Application configuration loaded explicitly from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai: OpenAiClientConfig,
    pub wikipedia: WikipediaClientConfig,
    pub youtube: YouTubeClientConfig,
    /// Chat model used for medium selection and sketches.
    pub classifier_model: String,
    pub image: ImageSettings,
    /// Character budget for encyclopedia summaries.
    pub summary_chars_max: usize,
    pub youtube_max_results: u32,
    /// Serve MCP over TCP instead of stdio when set.
    pub tcp_listen_addr: Option<String>,
}

impl Config {
    /// Required:
    /// - `OPENAI_API_KEY`
    ///
    /// Optional:
    /// - `OPENAI_*` client settings (see `OpenAiClientConfig::from_env`)
    /// - `CHITTI_CLASSIFIER_MODEL` (default: "gpt-4")
    /// - `CHITTI_IMAGE_MODEL`, `CHITTI_IMAGE_SIZE`, `CHITTI_IMAGE_QUALITY`
    ///   (default: "dall-e-3", "1024x1024", "standard")
    /// - `WIKIPEDIA_API_URL`, `WIKIPEDIA_SUMMARY_CHARS_MAX` (default: 1000)
    /// - `YOUTUBE_API_KEY`, `YOUTUBE_API_URL`, `YOUTUBE_MAX_RESULTS` (default: 2)
    /// - `MCP_TCP_LISTEN_ADDR`
    pub fn from_env() -> Result<Self, AppError> {
        Self::assemble(
            OpenAiClientConfig::from_env(),
            WikipediaClientConfig::from_env(),
            YouTubeClientConfig::from_env(),
            |name| std::env::var(name).ok(),
        )
    }

    fn assemble(
        openai: OpenAiClientConfig,
        wikipedia: WikipediaClientConfig,
        youtube: YouTubeClientConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        if openai.api_key.is_none() {
            return Err(AppError::Config(
                "OPENAI_API_KEY environment variable is required".to_string(),
            ));
        }

        let text = |name: &str, default: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let summary_chars_max: usize = parse_or(&lookup, "WIKIPEDIA_SUMMARY_CHARS_MAX", 1000)?;
        if summary_chars_max == 0 {
            return Err(AppError::Config(
                "WIKIPEDIA_SUMMARY_CHARS_MAX must be at least 1".to_string(),
            ));
        }

        let youtube_max_results: u32 = parse_or(&lookup, "YOUTUBE_MAX_RESULTS", 2)?;
        if !(1..=50).contains(&youtube_max_results) {
            return Err(AppError::Config(
                "YOUTUBE_MAX_RESULTS must be between 1 and 50".to_string(),
            ));
        }

        Ok(Self {
            classifier_model: text("CHITTI_CLASSIFIER_MODEL", "gpt-4"),
            image: ImageSettings {
                model: text("CHITTI_IMAGE_MODEL", "dall-e-3"),
                size: text("CHITTI_IMAGE_SIZE", "1024x1024"),
                quality: text("CHITTI_IMAGE_QUALITY", "standard"),
            },
            summary_chars_max,
            youtube_max_results,
            tcp_listen_addr: lookup("MCP_TCP_LISTEN_ADDR").filter(|v| !v.trim().is_empty()),
            openai,
            wikipedia,
            youtube,
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, AppError> {
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| AppError::Config(format!("{name} must be a number, got {raw:?}"))),
    }
}
