// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Caption → translate → truncate → speak
//!
//! Image and caption failures end the request. Translation and audio
//! failures are reported as notices and the request still renders.

use std::time::Duration;

use tokio::time::{timeout_at, Instant};
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::outcome::{Notice, NoticeKind, PipelineError, PipelineOutput};
use super::services::CaptionServices;
use super::state::RequestState;
use super::truncate::{truncate, DEFAULT_MAX_CAPTION_LENGTH};
use crate::config::NodeConfig;
use crate::speech::{AudioClip, SpeechError};
use crate::translation::{Language, TranslationError};
use crate::vision::{
    decode_base64_image, decode_image_bytes, ImageError, LoadedImage, DEFAULT_MAX_IMAGE_SIZE,
};

/// Limits applied to every run
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub max_caption_length: usize,
    pub max_image_bytes: usize,
    /// Time budget for one run
    ///
    /// Decoding and captioning past the deadline fail the request. Stages
    /// after the caption are cut short and reported as notices instead.
    pub timeout: Duration,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_caption_length: DEFAULT_MAX_CAPTION_LENGTH,
            max_image_bytes: DEFAULT_MAX_IMAGE_SIZE,
            timeout: Duration::from_secs(180),
        }
    }
}

impl From<&NodeConfig> for PipelineSettings {
    fn from(config: &NodeConfig) -> Self {
        Self {
            max_caption_length: config.max_caption_length,
            max_image_bytes: config.max_image_bytes,
            timeout: config.pipeline_timeout(),
        }
    }
}

/// Runs one image through every stage
///
/// Holds no per-request state, so one instance serves concurrent requests.
pub struct CaptionPipeline {
    services: CaptionServices,
    settings: PipelineSettings,
}

impl CaptionPipeline {
    pub fn new(services: CaptionServices, settings: PipelineSettings) -> Self {
        Self { services, settings }
    }

    pub fn from_config(config: &NodeConfig) -> Result<Self, PipelineError> {
        let services = CaptionServices::from_config(config)?;
        Ok(Self::new(services, PipelineSettings::from(config)))
    }

    pub fn services(&self) -> &CaptionServices {
        &self.services
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Run the pipeline on raw PNG or JPEG bytes
    pub async fn run_bytes(
        &self,
        bytes: &[u8],
        language: Language,
    ) -> Result<PipelineOutput, PipelineError> {
        self.run_bytes_with_id(Uuid::new_v4(), bytes, language)
            .await
    }

    /// Same as [`run_bytes`](Self::run_bytes) under a caller-chosen request id
    pub async fn run_bytes_with_id(
        &self,
        request_id: Uuid,
        bytes: &[u8],
        language: Language,
    ) -> Result<PipelineOutput, PipelineError> {
        self.run_with(request_id, language, |max| decode_image_bytes(bytes, max))
            .await
    }

    /// Run the pipeline on a base64 string or data URL
    pub async fn run_base64(
        &self,
        data: &str,
        language: Language,
    ) -> Result<PipelineOutput, PipelineError> {
        self.run_base64_with_id(Uuid::new_v4(), data, language)
            .await
    }

    pub async fn run_base64_with_id(
        &self,
        request_id: Uuid,
        data: &str,
        language: Language,
    ) -> Result<PipelineOutput, PipelineError> {
        self.run_with(request_id, language, |max| decode_base64_image(data, max))
            .await
    }

    async fn run_with<F>(
        &self,
        request_id: Uuid,
        language: Language,
        load: F,
    ) -> Result<PipelineOutput, PipelineError>
    where
        F: FnOnce(usize) -> Result<LoadedImage, ImageError>,
    {
        let span = info_span!("caption_request", %request_id, %language);
        self.execute(request_id, language, load)
            .instrument(span)
            .await
    }

    async fn execute<F>(
        &self,
        request_id: Uuid,
        language: Language,
        load: F,
    ) -> Result<PipelineOutput, PipelineError>
    where
        F: FnOnce(usize) -> Result<LoadedImage, ImageError>,
    {
        let start = Instant::now();
        let limit = self.settings.timeout;
        let deadline = start + limit;
        let mut state = RequestState::Idle;

        let image = match load(self.settings.max_image_bytes) {
            Ok(image) => image,
            Err(e) => return Err(fail(state, e.into())),
        };
        state = state.advance(RequestState::ImageReceived)?;
        info!(
            "Image received: {}x{} {:?}, {} bytes",
            image.width(),
            image.height(),
            image.info.format,
            image.info.size_bytes
        );

        let caption = match timeout_at(deadline, self.services.captioner.caption(&image)).await {
            Ok(Ok(caption)) => caption,
            Ok(Err(e)) => return Err(fail(state, e.into())),
            Err(_) => return Err(fail(state, PipelineError::Timeout(limit))),
        };
        state = state.advance(RequestState::Captioned)?;
        debug!("Caption: {:?}", caption.text);

        let mut notices = Vec::new();

        let (translated_caption, translation_notice) = self
            .translate_until(&caption.text, language, deadline)
            .await;
        // A fallback caption is English text and is spoken as English
        let spoken_language = if translation_notice.is_some() {
            Language::English
        } else {
            language
        };
        notices.extend(translation_notice);
        state = state.advance(RequestState::Translated)?;

        let display_caption = truncate(&translated_caption, self.settings.max_caption_length);
        state = state.advance(RequestState::Truncated)?;

        let audio = match self
            .synthesize_until(&display_caption, spoken_language, deadline)
            .await
        {
            Ok(clip) => Some(clip),
            Err(notice) => {
                notices.push(notice);
                None
            }
        };
        state = state.advance(if audio.is_some() {
            RequestState::AudioReady
        } else {
            RequestState::AudioFailed
        })?;

        state = state.advance(if notices.is_empty() {
            RequestState::Rendered
        } else {
            RequestState::RenderedWithError
        })?;

        let processing_time_ms = start.elapsed().as_millis() as u64;
        info!(
            "Request complete in {}ms: state={:?}, notices={}",
            processing_time_ms,
            state,
            notices.len()
        );

        Ok(PipelineOutput {
            request_id,
            image: image.info,
            caption,
            language,
            translated_caption,
            display_caption,
            audio,
            notices,
            state,
            translator: self.services.translator.name(),
            processing_time_ms,
        })
    }

    /// Translate an English caption, falling back to it on any failure
    ///
    /// English targets return the text unchanged without a backend call.
    pub async fn translate_with_fallback(
        &self,
        text: &str,
        target: Language,
    ) -> (String, Option<Notice>) {
        let deadline = Instant::now() + self.settings.timeout;
        self.translate_until(text, target, deadline).await
    }

    async fn translate_until(
        &self,
        text: &str,
        target: Language,
        deadline: Instant,
    ) -> (String, Option<Notice>) {
        if target.is_english() {
            return (text.to_string(), None);
        }

        let translator = &self.services.translator;
        let result = if translator.supports(target) {
            timeout_at(deadline, translator.translate(text, target))
                .await
                .unwrap_or(Err(TranslationError::Timeout))
        } else {
            Err(TranslationError::UnsupportedLanguage(target))
        };

        let error = match result {
            Ok(translated) if !translated.trim().is_empty() => {
                return (translated.trim().to_string(), None)
            }
            Ok(_) => TranslationError::EmptyTranslation,
            Err(e) => e,
        };

        warn!(
            "⚠️ Translation to {} failed, keeping English caption: {}",
            target, error
        );
        let notice = Notice::new(
            NoticeKind::TranslationError,
            format!("Error translating text: {}", error),
        );
        (text.to_string(), Some(notice))
    }

    async fn synthesize_until(
        &self,
        text: &str,
        language: Language,
        deadline: Instant,
    ) -> Result<AudioClip, Notice> {
        match timeout_at(deadline, self.synthesize_audio(text, language)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("⚠️ Audio synthesis ran past the request deadline");
                Err(Notice::new(
                    NoticeKind::AudioSynthesisError,
                    format!("Error generating audio: {}", SpeechError::Timeout),
                ))
            }
        }
    }

    async fn synthesize_audio(&self, text: &str, language: Language) -> Result<AudioClip, Notice> {
        let clip = self
            .services
            .synthesizer
            .synthesize(text, language)
            .await
            .map_err(|e| {
                warn!("⚠️ Audio synthesis failed: {}", e);
                Notice::new(
                    NoticeKind::AudioSynthesisError,
                    format!("Error generating audio: {}", e),
                )
            })?;

        clip.verify_playable().map_err(|e| {
            warn!("⚠️ Synthesized audio is not playable: {}", e);
            Notice::new(
                NoticeKind::AudioPlaybackError,
                format!("Error playing audio: {}", e),
            )
        })?;

        debug!("Audio ready: {} bytes", clip.len());
        Ok(clip)
    }
}

fn fail(state: RequestState, error: PipelineError) -> PipelineError {
    warn!("Request failed in state {:?}: {}", state, error);
    error
}
