pub mod http;

use async_trait::async_trait;

use crate::models::{ChatRequest, ChatResponse};

/// The remote chat endpoint. One call per user turn.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> anyhow::Result<ChatResponse>;
}
