mod classifier;
mod config;
mod error;
mod formatter;
mod llm;
mod model;
mod pipeline;
mod providers;
mod retriever;
mod server;
mod sketch;
#[cfg(test)]
mod testing;

use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chitti_common::openai::OpenAiClient;
use chitti_common::wikipedia::WikipediaClient;
use chitti_common::youtube::YouTubeClient;

use classifier::Classifier;
use config::Config;
use error::AppError;
use llm::OpenAiChat;
use pipeline::Explainer;
use providers::{DalleImageGenerator, WikipediaEncyclopedia, YouTubeVideoSearch};
use retriever::Retriever;
use server::ChittiServer;
use sketch::Sketcher;

fn build_services(config: &Config) -> Result<(Explainer, Sketcher), AppError> {
    let openai = Arc::new(OpenAiClient::new(config.openai.clone())?);
    let chat = Arc::new(OpenAiChat::new(
        Arc::clone(&openai),
        config.classifier_model.clone(),
    ));

    let youtube = YouTubeClient::new(config.youtube.clone())?;
    if !youtube.is_configured() {
        tracing::warn!("YOUTUBE_API_KEY not set, video explanations will fail");
    }

    let retriever = Retriever::new(
        Arc::new(WikipediaEncyclopedia::new(
            WikipediaClient::new(config.wikipedia.clone())?,
            config.summary_chars_max,
        )),
        Arc::new(DalleImageGenerator::new(
            Arc::clone(&openai),
            config.image.clone(),
        )),
        Arc::new(YouTubeVideoSearch::new(youtube)),
        config.youtube_max_results,
    );

    let explainer = Explainer::new(Classifier::new(chat.clone()), retriever);
    Ok((explainer, Sketcher::new(chat)))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting chitti");

    let config = Config::from_env()?;
    info!(
        base_url = %config.openai.base_url,
        timeout_ms = config.openai.default_timeout.as_millis(),
        max_retries = config.openai.max_retries,
        classifier_model = %config.classifier_model,
        image_model = %config.image.model,
        wikipedia = %config.wikipedia.api_url,
        youtube_max_results = config.youtube_max_results,
        "configuration loaded"
    );

    let (explainer, sketcher) = build_services(&config)?;

    // `chitti <query...>` answers once on stdout instead of serving MCP.
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        info!("one-shot mode, not serving MCP");
        let output = explainer.run(&args.join(" ")).await?;
        println!("{output}");
        return Ok(());
    }

    let server = ChittiServer::new(explainer, sketcher);

    if let Some(addr) = config.tcp_listen_addr.as_deref() {
        let listener = TcpListener::bind(addr).await?;
        info!(listen_addr = %addr, "MCP server ready, serving on TCP");
        loop {
            let (stream, peer) = listener.accept().await?;
            let server = server.clone();
            tokio::spawn(async move {
                tracing::info!(peer = %peer, "MCP client connected");
                let service = server.serve(stream).await.inspect_err(|e| {
                    tracing::error!(error = %e, "MCP server error");
                })?;
                service.waiting().await?;
                tracing::info!(peer = %peer, "MCP client disconnected");
                Ok::<(), anyhow::Error>(())
            });
        }
    } else {
        info!("MCP server ready, serving on stdio");
        let service = server.serve(stdio()).await.inspect_err(|e| {
            tracing::error!(error = %e, "MCP server error");
        })?;
        service.waiting().await?;
        info!("MCP server shut down");
    }
    Ok(())
}
