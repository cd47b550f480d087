// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Hugging Face Inference API client for image-to-text captioning

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{header, Client};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use super::caption::{Caption, CaptionError, CaptionGenerator};
use super::image_utils::LoadedImage;
use crate::utils::build_http_client;

/// Default image-to-text model
pub const DEFAULT_CAPTION_MODEL: &str = "Salesforce/blip-image-captioning-large";

#[derive(Debug, serde::Deserialize)]
struct GeneratedText {
    generated_text: String,
    #[serde(default)]
    score: Option<f32>,
}

/// Captions images through a hosted image-to-text pipeline
pub struct HfCaptionClient {
    client: Client,
    endpoint: String,
    model_name: String,
}

impl HfCaptionClient {
    /// Create a new caption client
    pub fn new(
        endpoint: &str,
        model_name: &str,
        api_token: Option<&str>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = build_http_client(api_token, None, timeout)?;
        let endpoint = endpoint.trim_end_matches('/').to_string();
        info!(
            "Caption client configured: endpoint={}, model={}",
            endpoint, model_name
        );

        Ok(Self {
            client,
            endpoint,
            model_name: model_name.to_string(),
        })
    }

    fn model_url(&self) -> String {
        format!("{}/models/{}", self.endpoint, self.model_name)
    }
}

#[async_trait]
impl CaptionGenerator for HfCaptionClient {
    async fn caption(&self, image: &LoadedImage) -> Result<Caption, CaptionError> {
        let start = Instant::now();
        let body = image.to_png_bytes()?;

        let response = self
            .client
            .post(self.model_url())
            .header(header::CONTENT_TYPE, "image/png")
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(CaptionError::Api { status, message });
        }

        let candidates: Vec<GeneratedText> = response.json().await?;
        let best = candidates
            .into_iter()
            .next()
            .ok_or_else(|| CaptionError::InvalidResponse("no caption candidates".to_string()))?;

        debug!(
            "Caption generated in {}ms by {}",
            start.elapsed().as_millis(),
            self.model_name
        );

        Caption::new(&best.generated_text, best.score, &self.model_name)
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
