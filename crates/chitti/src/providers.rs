//! Adapters binding the HTTP clients in `chitti-common` to the retriever's
//! provider traits.

use std::sync::Arc;

use async_trait::async_trait;
use chitti_common::openai::{ImageGenerationRequest, OpenAiClient};
use chitti_common::wikipedia::WikipediaClient;
use chitti_common::youtube::YouTubeClient;
use tracing::debug;

use crate::model::{ImageLocator, VideoHit};
use crate::retriever::{
    Encyclopedia, ImageGenerator, Provider, ProviderCause, ProviderError, VideoSearch,
};

pub struct WikipediaEncyclopedia {
    client: WikipediaClient,
    chars_max: usize,
}

impl WikipediaEncyclopedia {
    pub fn new(client: WikipediaClient, chars_max: usize) -> Self {
        Self { client, chars_max }
    }
}

#[async_trait]
impl Encyclopedia for WikipediaEncyclopedia {
    async fn summary(&self, topic: &str) -> Result<String, ProviderError> {
        let page = self
            .client
            .top_page(topic)
            .await
            .map_err(|e| ProviderError::new(Provider::Wikipedia, e))?
            .ok_or_else(|| ProviderError::new(Provider::Wikipedia, ProviderCause::NoResults))?;
        debug!(title = %page.title, extract_len = page.extract.len(), "wikipedia page found");
        Ok(page.to_summary(self.chars_max))
    }
}

#[derive(Debug, Clone)]
pub struct ImageSettings {
    pub model: String,
    pub size: String,
    pub quality: String,
}

pub struct DalleImageGenerator {
    client: Arc<OpenAiClient>,
    settings: ImageSettings,
}

impl DalleImageGenerator {
    pub fn new(client: Arc<OpenAiClient>, settings: ImageSettings) -> Self {
        Self { client, settings }
    }
}

#[async_trait]
impl ImageGenerator for DalleImageGenerator {
    async fn generate(&self, prompt: &str) -> Result<ImageLocator, ProviderError> {
        let request = ImageGenerationRequest {
            model: self.settings.model.clone(),
            prompt: prompt.to_string(),
            size: self.settings.size.clone(),
            quality: self.settings.quality.clone(),
            n: 1,
        };
        let response = self
            .client
            .image_generations(request, None)
            .await
            .map_err(|e| ProviderError::new(Provider::DallE, e))?;

        response
            .data
            .into_iter()
            .find_map(|img| {
                img.url.map(|url| ImageLocator {
                    url,
                    revised_prompt: img.revised_prompt,
                })
            })
            .ok_or_else(|| ProviderError::new(Provider::DallE, ProviderCause::NoResults))
    }
}

pub struct YouTubeVideoSearch {
    client: YouTubeClient,
}

impl YouTubeVideoSearch {
    pub fn new(client: YouTubeClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VideoSearch for YouTubeVideoSearch {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<VideoHit>, ProviderError> {
        let videos = self
            .client
            .search_videos(query, max_results)
            .await
            .map_err(|e| ProviderError::new(Provider::YouTube, e))?;
        Ok(videos
            .into_iter()
            .map(|v| VideoHit {
                url: v.watch_url(),
                title: v.title,
            })
            .collect())
    }
}
