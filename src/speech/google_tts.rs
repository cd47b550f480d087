// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Google Translate text-to-speech client
//!
//! Long text is sent in chunks; the MP3 frames of every chunk are
//! concatenated into one clip. No API key required.

use async_trait::async_trait;
use bytes::BytesMut;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use super::chunking::{split_for_tts, MAX_CHUNK_CHARS};
use super::provider::SpeechSynthesizer;
use super::types::{AudioClip, SpeechError};
use crate::translation::Language;
use crate::utils::{build_http_client, BROWSER_USER_AGENT};

pub const DEFAULT_TTS_ENDPOINT: &str = "https://translate.google.com";

/// Speech synthesizer backed by the `translate_tts` endpoint
pub struct GoogleTtsClient {
    client: Client,
    endpoint: String,
}

impl GoogleTtsClient {
    pub fn new(endpoint: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = build_http_client(None, Some(BROWSER_USER_AGENT), timeout)?;

        let endpoint = endpoint.trim_end_matches('/').to_string();
        info!("TTS client configured: endpoint={}", endpoint);

        Ok(Self { client, endpoint })
    }

    async fn fetch_chunk(
        &self,
        chunk: &str,
        language: Language,
        idx: usize,
        total: usize,
    ) -> Result<bytes::Bytes, SpeechError> {
        let total = total.to_string();
        let idx = idx.to_string();
        let textlen = chunk.chars().count().to_string();

        let response = self
            .client
            .get(format!("{}/translate_tts", self.endpoint))
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language.code()),
                ("q", chunk),
                ("total", total.as_str()),
                ("idx", idx.as_str()),
                ("textlen", textlen.as_str()),
                ("ttsspeed", "1"),
            ])
            .send()
            .await?;

        match response.status().as_u16() {
            200..=299 => {}
            // Unknown `tl` values come back as 404
            404 => return Err(SpeechError::UnsupportedLanguage(language)),
            status => {
                return Err(SpeechError::Api {
                    status,
                    message: response.text().await.unwrap_or_default(),
                })
            }
        }

        let audio = response.bytes().await?;
        if audio.is_empty() {
            return Err(SpeechError::EmptyAudio);
        }
        Ok(audio)
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTtsClient {
    async fn synthesize(&self, text: &str, language: Language) -> Result<AudioClip, SpeechError> {
        let chunks = split_for_tts(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(SpeechError::EmptyText);
        }

        let start = Instant::now();
        let total = chunks.len();
        let mut audio = BytesMut::new();

        for (idx, chunk) in chunks.iter().enumerate() {
            debug!("TTS chunk {}/{} ({} chars)", idx + 1, total, chunk.chars().count());
            let part = self.fetch_chunk(chunk, language, idx, total).await?;
            audio.extend_from_slice(&part);
        }

        debug!(
            "TTS complete: {} bytes in {}ms",
            audio.len(),
            start.elapsed().as_millis()
        );

        Ok(AudioClip::mp3(audio.freeze(), language))
    }

    fn name(&self) -> &'static str {
        "google-tts"
    }
}
