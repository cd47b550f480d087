// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the caption node

use std::env;
use std::time::Duration;

use crate::pipeline::DEFAULT_MAX_CAPTION_LENGTH;
use crate::speech::DEFAULT_TTS_ENDPOINT;
use crate::translation::{DEFAULT_MARIAN_ENDPOINT, DEFAULT_TRANSLATE_ENDPOINT};
use crate::vision::{DEFAULT_CAPTION_MODEL, DEFAULT_MAX_IMAGE_SIZE};

pub const DEFAULT_CAPTION_ENDPOINT: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_VLM_ENDPOINT: &str = "http://localhost:8081";
pub const DEFAULT_VLM_MODEL: &str = "qwen3-vl";

/// Caption backends
pub const CAPTION_BACKENDS: &[&str] = &["huggingface", "vlm"];

/// Translation backends
pub const TRANSLATOR_BACKENDS: &[&str] = &["google", "marian"];

/// Configuration for the caption node
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Address the HTTP API binds to
    pub api_host: String,
    pub api_port: u16,
    /// Which caption backend to construct ("huggingface" or "vlm")
    pub caption_backend: String,
    pub caption_endpoint: String,
    pub caption_model: String,
    /// Which translation backend to construct ("google" or "marian")
    pub translator_backend: String,
    pub translate_endpoint: String,
    pub marian_endpoint: String,
    pub tts_endpoint: String,
    /// Bearer token for the Hugging Face Inference API
    pub hf_api_token: Option<String>,
    /// Display length of the translated caption, in chars
    pub max_caption_length: usize,
    /// Timeout for each call to an external service
    pub service_timeout_secs: u64,
    /// Upper bound for one full pipeline run
    pub pipeline_timeout_secs: u64,
    /// Largest accepted upload in bytes
    pub max_image_bytes: usize,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl NodeConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let caption_backend = env_or("CAPTION_BACKEND", &defaults.caption_backend).to_lowercase();
        let (endpoint_default, model_default) = if caption_backend == "vlm" {
            (DEFAULT_VLM_ENDPOINT, DEFAULT_VLM_MODEL)
        } else {
            (DEFAULT_CAPTION_ENDPOINT, DEFAULT_CAPTION_MODEL)
        };

        Self {
            api_host: env_or("API_HOST", &defaults.api_host),
            api_port: env_parse("API_PORT", defaults.api_port),
            caption_endpoint: env_or("CAPTION_ENDPOINT", endpoint_default),
            caption_model: env_or("CAPTION_MODEL", model_default),
            caption_backend,
            translator_backend: env_or("TRANSLATOR_BACKEND", &defaults.translator_backend)
                .to_lowercase(),
            translate_endpoint: env_or("TRANSLATE_ENDPOINT", &defaults.translate_endpoint),
            marian_endpoint: env_or("MARIAN_ENDPOINT", &defaults.marian_endpoint),
            tts_endpoint: env_or("TTS_ENDPOINT", &defaults.tts_endpoint),
            hf_api_token: env::var("HF_API_TOKEN").ok().filter(|t| !t.is_empty()),
            max_caption_length: env_parse("MAX_CAPTION_LENGTH", defaults.max_caption_length),
            service_timeout_secs: env_parse("SERVICE_TIMEOUT_SECS", defaults.service_timeout_secs),
            pipeline_timeout_secs: env_parse(
                "PIPELINE_TIMEOUT_SECS",
                defaults.pipeline_timeout_secs,
            ),
            max_image_bytes: env_parse("MAX_IMAGE_BYTES", defaults.max_image_bytes),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !CAPTION_BACKENDS.contains(&self.caption_backend.as_str()) {
            return Err(format!(
                "unknown caption backend '{}', supported: {:?}",
                self.caption_backend, CAPTION_BACKENDS
            ));
        }
        if !TRANSLATOR_BACKENDS.contains(&self.translator_backend.as_str()) {
            return Err(format!(
                "unknown translator backend '{}', supported: {:?}",
                self.translator_backend, TRANSLATOR_BACKENDS
            ));
        }
        if self.caption_model.trim().is_empty() {
            return Err("Caption model must not be empty".to_string());
        }
        if self.max_caption_length == 0 {
            return Err("Max caption length must be greater than 0".to_string());
        }
        if self.service_timeout_secs == 0 || self.pipeline_timeout_secs == 0 {
            return Err("Timeouts must be greater than 0".to_string());
        }
        if self.max_image_bytes == 0 {
            return Err("Max image size must be greater than 0".to_string());
        }

        for (name, endpoint) in [
            ("CAPTION_ENDPOINT", &self.caption_endpoint),
            ("TRANSLATE_ENDPOINT", &self.translate_endpoint),
            ("MARIAN_ENDPOINT", &self.marian_endpoint),
            ("TTS_ENDPOINT", &self.tts_endpoint),
        ] {
            let url = url::Url::parse(endpoint)
                .map_err(|e| format!("{} is not a valid URL ({}): {}", name, endpoint, e))?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(format!("{} must use http or https, got {}", name, endpoint));
            }
        }

        Ok(())
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }

    pub fn service_timeout(&self) -> Duration {
        Duration::from_secs(self.service_timeout_secs)
    }

    pub fn pipeline_timeout(&self) -> Duration {
        Duration::from_secs(self.pipeline_timeout_secs)
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 8080,
            caption_backend: "huggingface".to_string(),
            caption_endpoint: DEFAULT_CAPTION_ENDPOINT.to_string(),
            caption_model: DEFAULT_CAPTION_MODEL.to_string(),
            translator_backend: "google".to_string(),
            translate_endpoint: DEFAULT_TRANSLATE_ENDPOINT.to_string(),
            marian_endpoint: DEFAULT_MARIAN_ENDPOINT.to_string(),
            tts_endpoint: DEFAULT_TTS_ENDPOINT.to_string(),
            hf_api_token: None,
            max_caption_length: DEFAULT_MAX_CAPTION_LENGTH,
            service_timeout_secs: 60,
            pipeline_timeout_secs: 180,
            max_image_bytes: DEFAULT_MAX_IMAGE_SIZE,
        }
    }
}
