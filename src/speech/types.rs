// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for speech synthesis

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use thiserror::Error;

use crate::translation::Language;

/// MIME type reported for synthesized audio
pub const MP3_MIME_TYPE: &str = "audio/mp3";

/// Synthesized speech, held in memory for the lifetime of one request
#[derive(Debug, Clone)]
pub struct AudioClip {
    data: Bytes,
    language: Language,
}

impl AudioClip {
    pub fn mp3(data: Bytes, language: Language) -> Self {
        Self { data, language }
    }

    pub fn bytes(&self) -> &Bytes {
        &self.data
    }

    pub fn into_bytes(self) -> Bytes {
        self.data
    }

    pub fn mime_type(&self) -> &'static str {
        MP3_MIME_TYPE
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }

    /// Check the clip can be handed to a player as MP3
    ///
    /// Accepts an ID3v2 tag or an MPEG audio frame sync at the start.
    pub fn verify_playable(&self) -> Result<(), AudioPlaybackError> {
        match self.data.as_ref() {
            [] => Err(AudioPlaybackError::Empty),
            [b'I', b'D', b'3', ..] => Ok(()),
            [0xFF, second, ..] if second & 0xE0 == 0xE0 => Ok(()),
            _ => Err(AudioPlaybackError::NotMp3),
        }
    }
}

/// Errors that can occur while synthesizing speech
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("Nothing to synthesize: text is empty")]
    EmptyText,

    #[error("Speech synthesis does not support {0}")]
    UnsupportedLanguage(Language),

    #[error("TTS request failed: {0}")]
    Request(String),

    #[error("TTS API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("TTS request timed out")]
    Timeout,

    #[error("TTS service returned no audio")]
    EmptyAudio,
}

impl From<reqwest::Error> for SpeechError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SpeechError::Timeout
        } else {
            SpeechError::Request(e.to_string())
        }
    }
}

/// Audio came back but cannot be played
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AudioPlaybackError {
    #[error("Audio clip is empty")]
    Empty,

    #[error("Audio clip is not MP3 data")]
    NotMp3,
}
