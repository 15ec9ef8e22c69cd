use std::sync::Arc;

use chitti_common::openai::OpenAiClientError;
use regex::Regex;
use tracing::{debug, info};

use crate::llm::LanguageModel;
use crate::model::{Classification, Medium};

#[derive(Debug, thiserror::Error)]
pub enum ClassificationError {
    #[error("language model backend unavailable: {0}")]
    BackendUnavailable(#[source] OpenAiClientError),

    #[error("malformed language model response: {0}")]
    MalformedResponse(String),
}

/// Picks the medium best suited to explain a query, with a short rationale.
///
/// One completion call per query; the rationale and medium come from the
/// same reply so they cannot disagree.
#[derive(Clone)]
pub struct Classifier {
    model: Arc<dyn LanguageModel>,
}

impl Classifier {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    pub async fn classify(&self, query: &str) -> Result<Classification, ClassificationError> {
        let prompt = build_prompt(query);
        let content = self
            .model
            .complete(&prompt)
            .await
            .map_err(ClassificationError::BackendUnavailable)?
            .ok_or_else(|| {
                ClassificationError::MalformedResponse("response had no content".to_string())
            })?;
        debug!(reply_len = content.len(), "classifier reply received");

        let classification = parse_reply(&content)?;
        info!(medium = %classification.medium, "query classified");
        Ok(classification)
    }
}

pub(crate) fn build_prompt(query: &str) -> String {
    format!(
        "You are Chitti, an AI that determines the best medium (text, image, or video) to explain a topic.\n\
\n\
Analyze this user query: \"{query}\"\n\
\n\
Consider:\n\
- Text: Best for definitions, concepts, historical facts, scientific explanations\n\
- Image: Best for visual appearance, objects, places, visual concepts\n\
- Video: Best for processes, tutorials, demonstrations, step-by-step instructions\n\
\n\
Respond with ONLY:\n\
1. Your reasoning (2-3 sentences explaining why you chose this medium)\n\
2. The selected medium: either \"text\", \"image\", or \"video\"\n\
\n\
Format:\n\
REASONING: [your reasoning here]\n\
MEDIUM: [text/image/video]\n"
    )
}

/// Parse a `REASONING: ...` / `MEDIUM: ...` reply.
///
/// Reasoning may run over several lines until the next label. The medium
/// must be exactly one of the three labels; no default is ever assumed.
pub(crate) fn parse_reply(content: &str) -> Result<Classification, ClassificationError> {
    let label_re = Regex::new(r"(?i)^\s*(?:\d+\.\s*)?\**\s*(reasoning|medium)\s*\**\s*:\s*\**(.*)$")
        .expect("valid regex");

    let mut reasoning: Option<String> = None;
    let mut medium_values: Vec<String> = Vec::new();
    let mut in_reasoning = false;

    for line in content.lines() {
        if let Some(caps) = label_re.captures(line) {
            let value = caps[2].trim().trim_end_matches('*').trim().to_string();
            if caps[1].eq_ignore_ascii_case("reasoning") {
                if reasoning.is_none() {
                    reasoning = Some(value);
                    in_reasoning = true;
                } else {
                    in_reasoning = false;
                }
            } else {
                medium_values.push(value);
                in_reasoning = false;
            }
            continue;
        }

        let line = line.trim();
        if in_reasoning && !line.is_empty() {
            if let Some(r) = reasoning.as_mut() {
                if !r.is_empty() {
                    r.push(' ');
                }
                r.push_str(line);
            }
        }
    }

    let rationale = reasoning
        .filter(|r| !r.is_empty())
        .ok_or_else(|| ClassificationError::MalformedResponse("missing REASONING".to_string()))?;

    let mut mediums = medium_values.iter().map(|raw| {
        raw.trim_matches(|c: char| matches!(c, '[' | ']' | '"' | '\'' | '`' | '.'))
            .parse::<Medium>()
            .map_err(|e| ClassificationError::MalformedResponse(e.to_string()))
    });
    let medium = mediums
        .next()
        .ok_or_else(|| ClassificationError::MalformedResponse("missing MEDIUM".to_string()))??;
    for other in mediums {
        if other? != medium {
            return Err(ClassificationError::MalformedResponse(
                "conflicting MEDIUM lines".to_string(),
            ));
        }
    }

    Ok(Classification { medium, rationale })
}
