// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Per-language translation with dedicated MarianMT models
//!
//! Each target language maps to its own pretrained English-to-X model served
//! by the Hugging Face Inference API. Languages without a model are reported
//! as unsupported.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::language::Language;
use super::provider::{TranslationError, Translator};
use crate::utils::build_http_client;

pub const DEFAULT_MARIAN_ENDPOINT: &str = "https://api-inference.huggingface.co";

#[derive(Debug, serde::Serialize)]
struct TranslationRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, serde::Deserialize)]
struct TranslationOutput {
    translation_text: String,
}

/// Model serving each target language, if any
pub fn model_for(target: Language) -> Option<&'static str> {
    match target {
        Language::Spanish => Some("Helsinki-NLP/opus-mt-en-es"),
        Language::French => Some("Helsinki-NLP/opus-mt-en-fr"),
        Language::German => Some("Helsinki-NLP/opus-mt-en-de"),
        Language::Chinese => Some("Helsinki-NLP/opus-mt-en-zh"),
        Language::Japanese => Some("Helsinki-NLP/opus-mt-en-jap"),
        Language::Hindi => Some("Helsinki-NLP/opus-mt-en-hi"),
        Language::English | Language::Punjabi => None,
    }
}

/// Translator that routes each language to its own model
pub struct MarianTranslator {
    client: Client,
    endpoint: String,
}

impl MarianTranslator {
    pub fn new(endpoint: &str, api_token: Option<&str>, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            client: build_http_client(api_token, None, timeout)?,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Translator for MarianTranslator {
    async fn translate(&self, text: &str, target: Language) -> Result<String, TranslationError> {
        let model = model_for(target).ok_or(TranslationError::UnsupportedLanguage(target))?;
        let url = format!("{}/models/{}", self.endpoint, model);
        debug!("Marian translate POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&TranslationRequest { inputs: text })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TranslationError::Api {
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let outputs: Vec<TranslationOutput> = response.json().await?;
        let translated = outputs
            .into_iter()
            .next()
            .map(|o| o.translation_text.trim().to_string())
            .unwrap_or_default();

        if translated.is_empty() {
            return Err(TranslationError::EmptyTranslation);
        }
        Ok(translated)
    }

    fn name(&self) -> &'static str {
        "marian"
    }

    fn supports(&self, target: Language) -> bool {
        model_for(target).is_some()
    }
}
