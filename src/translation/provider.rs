// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Translator trait definition

use async_trait::async_trait;
use thiserror::Error;

use super::language::Language;

/// Errors that can occur during translation
#[derive(Debug, Error)]
pub enum TranslationError {
    /// The backend has no capability for this language
    #[error("No translation model for {0}")]
    UnsupportedLanguage(Language),

    /// Transport-level failure
    #[error("Translation request failed: {0}")]
    Request(String),

    /// API error from the translation service
    #[error("Translation API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Translation request timed out")]
    Timeout,

    /// The service answered but nothing usable came back
    #[error("Unexpected translation response: {0}")]
    InvalidResponse(String),

    #[error("Translation service returned empty text")]
    EmptyTranslation,
}

impl From<reqwest::Error> for TranslationError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TranslationError::Timeout
        } else if e.is_decode() {
            TranslationError::InvalidResponse(e.to_string())
        } else {
            TranslationError::Request(e.to_string())
        }
    }
}

/// Trait for translation backends
///
/// Source text is English. Backends never need to handle English targets;
/// the pipeline short-circuits those.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `target`
    async fn translate(&self, text: &str, target: Language) -> Result<String, TranslationError>;

    /// Get the backend name for logging and responses
    fn name(&self) -> &'static str;

    /// Whether the backend can translate into `target`
    fn supports(&self, _target: Language) -> bool {
        true
    }
}
