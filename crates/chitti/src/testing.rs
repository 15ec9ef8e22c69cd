//! In-memory stand-ins for the language model and content providers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chitti_common::openai::OpenAiClientError;
use reqwest::StatusCode;

use crate::llm::LanguageModel;
use crate::model::{ImageLocator, VideoHit};
use crate::retriever::{
    Encyclopedia, ImageGenerator, Provider, ProviderError, Retriever, VideoSearch,
};

#[derive(Default)]
pub struct Recorder {
    calls: AtomicUsize,
    last: Mutex<Option<String>>,
}

impl Recorder {
    fn record(&self, input: &str) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(input.to_string());
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_input(&self) -> Option<String> {
        self.last.lock().unwrap().clone()
    }
}

fn outage() -> OpenAiClientError {
    OpenAiClientError::UpstreamBody {
        status: StatusCode::SERVICE_UNAVAILABLE,
        body: "upstream down".to_string(),
    }
}

enum Script {
    Reply(String),
    Unavailable,
    Empty,
}

pub struct ScriptedModel {
    script: Script,
    recorder: Recorder,
}

impl ScriptedModel {
    fn new(script: Script) -> Self {
        Self {
            script,
            recorder: Recorder::default(),
        }
    }

    pub fn reply(text: &str) -> Self {
        Self::new(Script::Reply(text.to_string()))
    }

    pub fn unavailable() -> Self {
        Self::new(Script::Unavailable)
    }

    pub fn empty() -> Self {
        Self::new(Script::Empty)
    }

    pub fn calls(&self) -> usize {
        self.recorder.calls()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.recorder.last_input()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, prompt: &str) -> Result<Option<String>, OpenAiClientError> {
        self.recorder.record(prompt);
        match &self.script {
            Script::Reply(text) => Ok(Some(text.clone())),
            Script::Unavailable => Err(outage()),
            Script::Empty => Ok(None),
        }
    }
}

#[derive(Default)]
pub struct FakeEncyclopedia(Recorder);

impl FakeEncyclopedia {
    pub fn last_input(&self) -> Option<String> {
        self.0.last_input()
    }
}

#[async_trait]
impl Encyclopedia for FakeEncyclopedia {
    async fn summary(&self, topic: &str) -> Result<String, ProviderError> {
        self.0.record(topic);
        Ok(format!("Page: {topic}\nSummary: Summary of {topic}"))
    }
}

#[derive(Default)]
pub struct FakeImages {
    recorder: Recorder,
    fail: bool,
}

impl FakeImages {
    pub fn last_input(&self) -> Option<String> {
        self.recorder.last_input()
    }
}

#[async_trait]
impl ImageGenerator for FakeImages {
    async fn generate(&self, prompt: &str) -> Result<ImageLocator, ProviderError> {
        self.recorder.record(prompt);
        if self.fail {
            return Err(ProviderError::new(Provider::DallE, outage()));
        }
        Ok(ImageLocator {
            url: format!("https://images.test/{}.png", self.recorder.calls()),
            revised_prompt: None,
        })
    }
}

#[derive(Default)]
pub struct FakeVideos {
    recorder: Recorder,
    empty: bool,
}

impl FakeVideos {
    pub fn last_input(&self) -> Option<String> {
        self.recorder.last_input()
    }
}

#[async_trait]
impl VideoSearch for FakeVideos {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<VideoHit>, ProviderError> {
        self.recorder.record(query);
        if self.empty {
            return Ok(vec![]);
        }
        Ok((1..=5)
            .take(max_results as usize)
            .map(|i| VideoHit {
                title: format!("Video {i}"),
                url: format!("https://www.youtube.com/watch?v=v{i}"),
            })
            .collect())
    }
}

pub struct FakeProviders {
    pub encyclopedia: Arc<FakeEncyclopedia>,
    pub images: Arc<FakeImages>,
    pub videos: Arc<FakeVideos>,
}

impl FakeProviders {
    pub fn ok() -> Self {
        Self {
            encyclopedia: Arc::new(FakeEncyclopedia::default()),
            images: Arc::new(FakeImages::default()),
            videos: Arc::new(FakeVideos::default()),
        }
    }

    pub fn with_failing_images(mut self) -> Self {
        self.images = Arc::new(FakeImages {
            fail: true,
            ..FakeImages::default()
        });
        self
    }

    pub fn with_no_videos(mut self) -> Self {
        self.videos = Arc::new(FakeVideos {
            empty: true,
            ..FakeVideos::default()
        });
        self
    }

    pub fn retriever(&self, max_videos: u32) -> Retriever {
        Retriever::new(
            self.encyclopedia.clone(),
            self.images.clone(),
            self.videos.clone(),
            max_videos,
        )
    }

    /// Calls made to (encyclopedia, images, videos).
    pub fn calls(&self) -> (usize, usize, usize) {
        (
            self.encyclopedia.0.calls(),
            self.images.recorder.calls(),
            self.videos.recorder.calls(),
        )
    }
}
