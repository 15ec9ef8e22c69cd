use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::{Medium, Retrieval};
use crate::pipeline::Explainer;
use crate::sketch::Sketcher;

#[derive(Clone)]
pub struct ChittiServer {
    explainer: Explainer,
    sketcher: Sketcher,
    tool_router: ToolRouter<ChittiServer>,
}

impl ChittiServer {
    pub fn new(explainer: Explainer, sketcher: Sketcher) -> Self {
        Self {
            explainer,
            sketcher,
            tool_router: Self::tool_router(),
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct QueryParams {
    /// The question or topic to explain.
    query: String,
}

#[derive(Debug, Serialize, JsonSchema)]
struct ExplainResponse {
    query: String,
    medium: Medium,
    rationale: String,
    /// Raw provider payload: summary text, image locator or video list.
    content: Retrieval,
    /// Markdown combining the rationale with the retrieved content.
    output: String,
}

#[derive(Debug, Serialize, JsonSchema)]
struct SelectMediumResponse {
    medium: Medium,
    rationale: String,
}

#[derive(Debug, Serialize, JsonSchema)]
struct TextResponse {
    text: String,
}

fn require_query(params: &QueryParams) -> Result<String, String> {
    let query = params.query.trim().to_string();
    if query.is_empty() {
        return Err("query must not be empty".to_string());
    }
    Ok(query)
}

#[tool_router]
impl ChittiServer {
    #[tool(description = "Explain a topic in the medium that suits it best: picks text, image or video, then returns a Wikipedia summary, a generated image, or a list of YouTube videos, prefixed by the reasoning for the choice.")]
    async fn explain(
        &self,
        Parameters(params): Parameters<QueryParams>,
    ) -> Result<Json<ExplainResponse>, String> {
        let query = require_query(&params)?;
        let explanation = self.explainer.explain(&query).await.map_err(|e| {
            warn!(error = %e, "explain failed");
            format!("explain failed: {e}")
        })?;
        Ok(Json(ExplainResponse {
            query: explanation.query,
            medium: explanation.medium,
            rationale: explanation.rationale,
            content: explanation.retrieval,
            output: explanation.output,
        }))
    }

    #[tool(description = "Decide which medium (text, image or video) would best explain a topic, with a short rationale. Does not fetch any content.")]
    async fn select_medium(
        &self,
        Parameters(params): Parameters<QueryParams>,
    ) -> Result<Json<SelectMediumResponse>, String> {
        let query = require_query(&params)?;
        let classification = self
            .explainer
            .classifier()
            .classify(&query)
            .await
            .map_err(|e| format!("select_medium failed: {e}"))?;
        Ok(Json(SelectMediumResponse {
            medium: classification.medium,
            rationale: classification.rationale,
        }))
    }

    #[tool(description = "Quick single-call sketch: the model states its reasoning and drafts a mock answer in the chosen medium without calling Wikipedia, image generation or YouTube.")]
    async fn sketch_explanation(
        &self,
        Parameters(params): Parameters<QueryParams>,
    ) -> Result<Json<TextResponse>, String> {
        let query = require_query(&params)?;
        let text = self
            .sketcher
            .sketch(&query)
            .await
            .map_err(|e| format!("sketch_explanation failed: {e}"))?;
        Ok(Json(TextResponse { text }))
    }
}

#[tool_handler]
impl ServerHandler for ChittiServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "chitti".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Chitti explains topics through the most effective medium. Call explain with a \
question to get reasoning plus a Wikipedia summary, generated image, or YouTube video list. \
Use select_medium to only see which medium would be chosen, or sketch_explanation for a quick \
model-only draft."
                    .to_string(),
            ),
        }
    }
}
