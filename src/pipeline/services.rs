// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Backend construction
//!
//! Each backend is built once at start-up and shared across requests.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::outcome::PipelineError;
use crate::config::NodeConfig;
use crate::speech::{GoogleTtsClient, SpeechSynthesizer};
use crate::translation::{GoogleTranslateClient, MarianTranslator, Translator};
use crate::vision::{CaptionGenerator, HfCaptionClient, VlmCaptionClient};

/// Information about a configured backend
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfo {
    pub name: String,
    /// caption, translation or speech
    pub service_type: &'static str,
    pub available: bool,
}

/// The three backends a pipeline run needs
#[derive(Clone)]
pub struct CaptionServices {
    pub captioner: Arc<dyn CaptionGenerator>,
    pub translator: Arc<dyn Translator>,
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
}

impl CaptionServices {
    pub fn new(
        captioner: Arc<dyn CaptionGenerator>,
        translator: Arc<dyn Translator>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        Self {
            captioner,
            translator,
            synthesizer,
        }
    }

    /// Build the backends named in `config`
    ///
    /// Any failure here is a model-load error and the node should not start.
    pub fn from_config(config: &NodeConfig) -> Result<Self, PipelineError> {
        let timeout = config.service_timeout();
        let token = config.hf_api_token.as_deref();

        let captioner: Arc<dyn CaptionGenerator> = match config.caption_backend.as_str() {
            "huggingface" => Arc::new(
                HfCaptionClient::new(&config.caption_endpoint, &config.caption_model, token, timeout)
                    .map_err(|e| load_failed("caption", e))?,
            ),
            "vlm" => Arc::new(
                VlmCaptionClient::new(&config.caption_endpoint, &config.caption_model, token, timeout)
                    .map_err(|e| load_failed("caption", e))?,
            ),
            other => {
                return Err(PipelineError::ModelLoad(format!(
                    "unknown caption backend '{}'",
                    other
                )))
            }
        };
        info!(
            "✅ Caption backend ready: {} ({})",
            config.caption_backend,
            captioner.model_name()
        );

        let translator: Arc<dyn Translator> = match config.translator_backend.as_str() {
            "google" => Arc::new(
                GoogleTranslateClient::new(&config.translate_endpoint, timeout)
                    .map_err(|e| load_failed("translation", e))?,
            ),
            "marian" => Arc::new(
                MarianTranslator::new(&config.marian_endpoint, token, timeout)
                    .map_err(|e| load_failed("translation", e))?,
            ),
            other => {
                return Err(PipelineError::ModelLoad(format!(
                    "unknown translator backend '{}'",
                    other
                )))
            }
        };
        info!("✅ Translator ready: {}", translator.name());

        let synthesizer: Arc<dyn SpeechSynthesizer> = Arc::new(
            GoogleTtsClient::new(&config.tts_endpoint, timeout)
                .map_err(|e| load_failed("speech", e))?,
        );
        info!("✅ Speech synthesizer ready: {}", synthesizer.name());

        Ok(Self::new(captioner, translator, synthesizer))
    }

    /// List the configured backends
    ///
    /// Only the caption backend can be probed; the others report available.
    pub async fn list_services(&self) -> Vec<ServiceInfo> {
        let caption_up = self.captioner.health_check().await;
        if !caption_up {
            warn!(
                "⚠️ Caption backend {} failed its health check",
                self.captioner.model_name()
            );
        }

        vec![
            ServiceInfo {
                name: self.captioner.model_name().to_string(),
                service_type: "caption",
                available: caption_up,
            },
            ServiceInfo {
                name: self.translator.name().to_string(),
                service_type: "translation",
                available: true,
            },
            ServiceInfo {
                name: self.synthesizer.name().to_string(),
                service_type: "speech",
                available: true,
            },
        ]
    }
}

fn load_failed(service: &str, e: anyhow::Error) -> PipelineError {
    warn!("⚠️ Failed to build {} backend: {}", service, e);
    PipelineError::ModelLoad(format!("{} backend: {}", service, e))
}
