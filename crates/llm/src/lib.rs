//! Shopsearch LLM integration
//!
//! OpenAI-compatible embedding and chat completion clients

mod chat;
mod client;
mod embedder;
mod prompts;
mod types;

pub use chat::ChatClient;
pub use client::HttpEmbedder;
pub use embedder::Embedder;
pub use prompts::shopping_system_prompt;
pub use types::{
    ChatMessage, ChatRequest, EmbeddingData, EmbeddingInput, EmbeddingRequest, EmbeddingResponse,
    EmbeddingUsage,
};
