pub mod error;
pub mod http;
pub mod openai;
pub mod wikipedia;
pub mod youtube;
