// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Caption request types and validation

use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::translation::Language;

/// Request body for POST /v1/caption
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionRequest {
    /// Base64-encoded PNG or JPEG, bare or as a data URL
    #[serde(default)]
    pub image: Option<String>,

    /// Target language name or code, English when omitted
    #[serde(default)]
    pub language: Option<String>,
}

impl CaptionRequest {
    /// Validate the request and resolve the target language
    pub fn validate(&self) -> Result<Language, ApiError> {
        if self.image.as_deref().map(str::trim).unwrap_or("").is_empty() {
            return Err(ApiError::ValidationError {
                field: "image".to_string(),
                message: "image is required".to_string(),
            });
        }

        parse_language(self.language.as_deref())
    }
}

/// Request body for POST /v1/caption/download
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadRequest {
    pub text: String,
}

impl DownloadRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.text.is_empty() {
            return Err(ApiError::ValidationError {
                field: "text".to_string(),
                message: "text must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Resolve an optional language field, defaulting to English
pub fn parse_language(value: Option<&str>) -> Result<Language, ApiError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(Language::default()),
        Some(name) => name
            .parse::<Language>()
            .map_err(|e| ApiError::ValidationError {
                field: "language".to_string(),
                message: format!(
                    "{}, supported: {:?}",
                    e,
                    Language::ALL.map(|l| l.display_name())
                ),
            }),
    }
}
