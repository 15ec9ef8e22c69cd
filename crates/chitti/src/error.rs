use chitti_common::error::ApiError;
use chitti_common::openai::OpenAiClientError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("openai client error: {0}")]
    OpenAi(#[from] OpenAiClientError),

    #[error("content client error: {0}")]
    Api(#[from] ApiError),
}
