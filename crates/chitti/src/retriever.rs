use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chitti_common::error::ApiError;
use chitti_common::openai::OpenAiClientError;
use tracing::info;

use crate::model::{ImageLocator, Medium, Retrieval, VideoHit};

/// External content sources, one per medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Wikipedia,
    DallE,
    YouTube,
}

impl Provider {
    pub fn for_medium(medium: Medium) -> Self {
        match medium {
            Medium::Text => Provider::Wikipedia,
            Medium::Image => Provider::DallE,
            Medium::Video => Provider::YouTube,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Provider::Wikipedia => "wikipedia",
            Provider::DallE => "dall-e",
            Provider::YouTube => "youtube",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderCause {
    #[error(transparent)]
    OpenAi(#[from] OpenAiClientError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("no results")]
    NoResults,
}

#[derive(Debug, thiserror::Error)]
#[error("{provider} provider failed: {cause}")]
pub struct ProviderError {
    pub provider: Provider,
    #[source]
    pub cause: ProviderCause,
}

impl ProviderError {
    pub fn new(provider: Provider, cause: impl Into<ProviderCause>) -> Self {
        Self {
            provider,
            cause: cause.into(),
        }
    }
}

#[async_trait]
pub trait Encyclopedia: Send + Sync {
    /// Summary text for the best-matching article.
    async fn summary(&self, topic: &str) -> Result<String, ProviderError>;
}

#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<ImageLocator, ProviderError>;
}

#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Up to `max_results` hits, best first.
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<VideoHit>, ProviderError>;
}

/// Fetches raw content for a query from the provider matching its medium.
#[derive(Clone)]
pub struct Retriever {
    encyclopedia: Arc<dyn Encyclopedia>,
    images: Arc<dyn ImageGenerator>,
    videos: Arc<dyn VideoSearch>,
    max_videos: u32,
}

impl Retriever {
    pub fn new(
        encyclopedia: Arc<dyn Encyclopedia>,
        images: Arc<dyn ImageGenerator>,
        videos: Arc<dyn VideoSearch>,
        max_videos: u32,
    ) -> Self {
        Self {
            encyclopedia,
            images,
            videos,
            max_videos: max_videos.max(1),
        }
    }

    pub async fn retrieve(&self, medium: Medium, query: &str) -> Result<Retrieval, ProviderError> {
        let provider = Provider::for_medium(medium);
        info!(%medium, %provider, "retrieving content");

        let retrieval = match medium {
            Medium::Text => {
                let summary = self.encyclopedia.summary(query).await?;
                if summary.trim().is_empty() {
                    return Err(ProviderError::new(provider, ProviderCause::NoResults));
                }
                Retrieval::Text(summary)
            }
            Medium::Image => {
                let locator = self.images.generate(&image_prompt(query)).await?;
                if locator.url.trim().is_empty() {
                    return Err(ProviderError::new(provider, ProviderCause::NoResults));
                }
                Retrieval::Image(locator)
            }
            Medium::Video => {
                let mut hits = self
                    .videos
                    .search(&video_query(query), self.max_videos)
                    .await?;
                hits.truncate(self.max_videos as usize);
                if hits.is_empty() {
                    return Err(ProviderError::new(provider, ProviderCause::NoResults));
                }
                Retrieval::Video(hits)
            }
        };
        Ok(retrieval)
    }
}

pub(crate) fn image_prompt(query: &str) -> String {
    format!("A clear, educational illustration of {query}, high quality, detailed")
}

pub(crate) fn video_query(query: &str) -> String {
    format!("{query} tutorial explanation")
}
