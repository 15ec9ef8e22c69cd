use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The way an answer is presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Medium {
    Text,
    Image,
    Video,
}

impl Medium {
    pub const ALL: [Medium; 3] = [Medium::Text, Medium::Image, Medium::Video];

    pub fn as_str(self) -> &'static str {
        match self {
            Medium::Text => "text",
            Medium::Image => "image",
            Medium::Video => "video",
        }
    }
}

impl fmt::Display for Medium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown medium {0:?} (expected text, image or video)")]
pub struct UnknownMedium(pub String);

impl FromStr for Medium {
    type Err = UnknownMedium;

    /// Accepts the three labels case-insensitively, surrounding whitespace
    /// ignored. Anything else is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Medium::ALL
            .into_iter()
            .find(|m| m.as_str() == normalized)
            .ok_or_else(|| UnknownMedium(s.to_string()))
    }
}

/// Output of the classifier: the chosen medium and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Classification {
    pub medium: Medium,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct ImageLocator {
    pub url: String,
    /// Prompt as rewritten by the image model, when it reports one.
    pub revised_prompt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct VideoHit {
    pub title: String,
    pub url: String,
}

/// Raw provider payload, one variant per medium.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Retrieval {
    Text(String),
    Image(ImageLocator),
    Video(Vec<VideoHit>),
}

impl Retrieval {
    pub fn medium(&self) -> Medium {
        match self {
            Retrieval::Text(_) => Medium::Text,
            Retrieval::Image(_) => Medium::Image,
            Retrieval::Video(_) => Medium::Video,
        }
    }
}

/// Everything produced while answering one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    pub query: String,
    pub medium: Medium,
    pub rationale: String,
    pub retrieval: Retrieval,
    pub output: String,
}
