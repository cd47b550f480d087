// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Caption generator trait and result types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::image_utils::{ImageError, LoadedImage};

/// A generated caption for one image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Caption {
    /// Best caption candidate, trimmed and never empty
    pub text: String,
    /// Model certainty in [0, 1] when the backend reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    /// Model that produced the caption
    pub model: String,
}

impl Caption {
    /// Build a caption from a raw model answer
    ///
    /// Whitespace-only answers are rejected so downstream stages always get text.
    pub fn new(
        text: &str,
        confidence: Option<f32>,
        model: &str,
    ) -> Result<Self, CaptionError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CaptionError::EmptyCaption);
        }

        Ok(Self {
            text: text.to_string(),
            confidence: confidence
                .filter(|c| c.is_finite())
                .map(|c| c.clamp(0.0, 1.0)),
            model: model.to_string(),
        })
    }
}

/// Errors from the caption backends
#[derive(Debug, Error)]
pub enum CaptionError {
    #[error("Caption service request failed: {0}")]
    Request(String),

    #[error("Caption service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Caption service timed out")]
    Timeout,

    #[error("Unexpected caption response: {0}")]
    InvalidResponse(String),

    #[error("Caption model returned an empty caption")]
    EmptyCaption,

    #[error("Failed to prepare image for captioning: {0}")]
    Image(#[from] ImageError),
}

impl From<reqwest::Error> for CaptionError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            CaptionError::Timeout
        } else if e.is_decode() {
            CaptionError::InvalidResponse(e.to_string())
        } else {
            CaptionError::Request(e.to_string())
        }
    }
}

/// Trait for image-to-text backends
///
/// Implementations are constructed once at start-up and shared across requests.
#[async_trait]
pub trait CaptionGenerator: Send + Sync {
    /// Produce a caption for the decoded image
    async fn caption(&self, image: &LoadedImage) -> Result<Caption, CaptionError>;

    /// Model identifier for logging and responses
    fn model_name(&self) -> &str;

    /// Check if the backend is reachable
    async fn health_check(&self) -> bool {
        true
    }
}
