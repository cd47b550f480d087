// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! VLM sidecar client for captioning via OpenAI-compatible API

use anyhow::Result;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use super::caption::{Caption, CaptionError, CaptionGenerator};
use super::image_utils::LoadedImage;
use crate::utils::build_http_client;

// --- OpenAI-compatible serde structs ---

#[derive(serde::Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(serde::Serialize)]
struct ChatMessage {
    role: String,
    content: serde_json::Value,
}

#[derive(serde::Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(serde::Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(serde::Deserialize)]
struct ChatResponseMessage {
    content: String,
}

const CAPTION_PROMPT: &str = "Describe this image in one sentence.";

/// Client for captioning through a VLM sidecar service
pub struct VlmCaptionClient {
    client: Client,
    endpoint: String,
    model_name: String,
}

impl VlmCaptionClient {
    /// Create a new VLM client
    pub fn new(
        endpoint: &str,
        model_name: &str,
        api_token: Option<&str>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = build_http_client(api_token, None, timeout)?;
        let endpoint = endpoint.trim_end_matches('/').to_string();
        info!(
            "VLM caption client configured: endpoint={}, model={}",
            endpoint, model_name
        );

        Ok(Self {
            client,
            endpoint,
            model_name: model_name.to_string(),
        })
    }

    fn build_request(&self, png_base64: &str) -> ChatRequest {
        let data_url = format!("data:image/png;base64,{}", png_base64);
        ChatRequest {
            model: self.model_name.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: serde_json::json!([
                    {"type": "text", "text": CAPTION_PROMPT},
                    {"type": "image_url", "image_url": {"url": data_url}}
                ]),
            }],
            max_tokens: 100,
            temperature: 0.3,
        }
    }
}

#[async_trait]
impl CaptionGenerator for VlmCaptionClient {
    async fn caption(&self, image: &LoadedImage) -> Result<Caption, CaptionError> {
        let start = Instant::now();
        let png = image.to_png_bytes()?;
        let request = self.build_request(&STANDARD.encode(png));

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.endpoint))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(CaptionError::Api { status, message });
        }

        let chat_response: ChatResponse = response.json().await?;
        let text = chat_response
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .unwrap_or_default();

        debug!(
            "VLM caption complete in {}ms (model: {})",
            start.elapsed().as_millis(),
            self.model_name
        );

        Caption::new(&text, None, &self.model_name)
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(format!("{}/health", self.endpoint))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!("VLM health check failed: {}", e);
                false
            }
        }
    }
}
