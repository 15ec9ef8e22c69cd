use std::sync::Arc;

use tracing::info;

use crate::classifier::ClassificationError;
use crate::llm::LanguageModel;

/// Single-call variant of the explainer: the model picks a medium and
/// describes what it would show, with no provider lookup.
#[derive(Clone)]
pub struct Sketcher {
    model: Arc<dyn LanguageModel>,
}

impl Sketcher {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    pub async fn sketch(&self, query: &str) -> Result<String, ClassificationError> {
        let text = self
            .model
            .complete(&build_prompt(query))
            .await
            .map_err(ClassificationError::BackendUnavailable)?
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                ClassificationError::MalformedResponse("response had no content".to_string())
            })?;
        info!(reply_len = text.len(), "sketch produced");
        Ok(text)
    }
}

fn build_prompt(query: &str) -> String {
    format!(
        "You are Chitti, a helpful bot specialized in explaining topics through the most effective medium.\n\
\n\
For the query: \"{query}\"\n\
\n\
1. First, provide your REASONING for which medium (text, image, or video) would be best\n\
2. Then provide a mock response in that format:\n\
   - For text: Provide a detailed explanation\n\
   - For image: Describe what image would be generated and provide a placeholder URL\n\
   - For video: List relevant video topics that would be searched\n\
\n\
Always start with \"**Reasoning:**\" followed by your analysis, then provide the appropriate output.\n"
    )
}
