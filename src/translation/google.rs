// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Generic translation through the Google Translate web endpoint
//!
//! One capability for every language, parameterised by the target code.
//! No API key required.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::language::Language;
use super::provider::{TranslationError, Translator};
use crate::utils::build_http_client;

pub const DEFAULT_TRANSLATE_ENDPOINT: &str = "https://translate.googleapis.com";

/// Translator backed by the public `translate_a/single` endpoint
pub struct GoogleTranslateClient {
    client: Client,
    endpoint: String,
}

impl GoogleTranslateClient {
    pub fn new(endpoint: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = build_http_client(None, None, timeout)?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Translator for GoogleTranslateClient {
    async fn translate(&self, text: &str, target: Language) -> Result<String, TranslationError> {
        let url = format!("{}/translate_a/single", self.endpoint);
        debug!("Translate GET {} -> {}", url, target.code());

        let response = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", "en"),
                ("tl", target.code()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TranslationError::Api {
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let body: serde_json::Value = response.json().await?;
        parse_translation(&body)
    }

    fn name(&self) -> &'static str {
        "google"
    }
}

/// Join the translated segments of a `translate_a/single` response
///
/// The body is a nested array; element 0 lists `[translated, source, ...]`
/// pairs, one per sentence.
fn parse_translation(body: &serde_json::Value) -> Result<String, TranslationError> {
    let segments = body
        .get(0)
        .and_then(|s| s.as_array())
        .ok_or_else(|| TranslationError::InvalidResponse("missing segment list".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(|t| t.as_str()))
        .collect();

    let translated = translated.trim();
    if translated.is_empty() {
        return Err(TranslationError::EmptyTranslation);
    }
    Ok(translated.to_string())
}
