use tracing::{debug, info};

use crate::classifier::{ClassificationError, Classifier};
use crate::formatter::format_response;
use crate::model::{Explanation, Retrieval};
use crate::retriever::{ProviderError, Retriever};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("query must not be empty")]
    EmptyQuery,

    #[error("classification failed: {0}")]
    Classification(#[from] ClassificationError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Classify, retrieve, format. Each stage runs only after the previous one
/// succeeded; the first failure ends the run.
#[derive(Clone)]
pub struct Explainer {
    classifier: Classifier,
    retriever: Retriever,
}

impl Explainer {
    pub fn new(classifier: Classifier, retriever: Retriever) -> Self {
        Self {
            classifier,
            retriever,
        }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub async fn explain(&self, query: &str) -> Result<Explanation, PipelineError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(PipelineError::EmptyQuery);
        }
        info!(query_len = query.len(), "explaining query");

        let classification = self.classifier.classify(query).await?;
        let retrieval = self
            .retriever
            .retrieve(classification.medium, query)
            .await?;
        debug_assert_eq!(retrieval.medium(), classification.medium);
        debug!(size = retrieval_size(&retrieval), "content retrieved");

        let output = format_response(&classification.rationale, &retrieval);
        Ok(Explanation {
            query: query.to_string(),
            medium: classification.medium,
            rationale: classification.rationale,
            retrieval,
            output,
        })
    }

    /// String in, formatted explanation out.
    pub async fn run(&self, query: &str) -> Result<String, PipelineError> {
        Ok(self.explain(query).await?.output)
    }
}

fn retrieval_size(retrieval: &Retrieval) -> usize {
    match retrieval {
        Retrieval::Text(s) => s.chars().count(),
        Retrieval::Image(_) => 1,
        Retrieval::Video(hits) => hits.len(),
    }
}
