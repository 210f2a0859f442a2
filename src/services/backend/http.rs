use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;

use super::ChatBackend;
use crate::errors::AppError;
use crate::models::{ChatRequest, ChatResponse};

pub struct HttpChatBackend {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpChatBackend {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            endpoint: chat_endpoint(base_url),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn chat_endpoint(base_url: &str) -> String {
    format!("{}/chat", base_url.trim_end_matches('/'))
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn send(&self, request: &ChatRequest) -> anyhow::Result<ChatResponse> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .context("failed to call chat backend")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AppError::Backend(format!("{status}: {body}")).into());
        }

        resp.json::<ChatResponse>()
            .await
            .context("failed to parse chat backend response")
    }
}
