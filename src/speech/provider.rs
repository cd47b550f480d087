// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Speech synthesizer trait definition

use async_trait::async_trait;

use super::types::{AudioClip, SpeechError};
use crate::translation::Language;

/// Trait for text-to-speech backends
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Speak `text` in `language`, returning MP3 audio
    async fn synthesize(&self, text: &str, language: Language) -> Result<AudioClip, SpeechError>;

    /// Get the backend name for logging
    fn name(&self) -> &'static str;
}
