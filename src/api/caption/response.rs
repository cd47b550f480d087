// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Caption response types

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;

use crate::pipeline::{Notice, PipelineOutput, RequestState};
use crate::translation::LanguageInfo;
use crate::vision::format_to_extension;

/// Dimensions and format of the uploaded image
#[derive(Debug, Clone, Serialize)]
pub struct ImageSummary {
    pub width: u32,
    pub height: u32,
    pub format: String,
}

/// Base64 MP3 for the audio player
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioPayload {
    pub mime_type: String,
    pub data: String,
}

/// The caption.txt download, inlined as base64
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadPayload {
    pub file_name: String,
    pub mime_type: String,
    pub data: String,
}

/// Response for the caption endpoints
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionResponse {
    pub request_id: String,
    pub image: ImageSummary,
    pub caption: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    pub translated_caption: String,
    /// Translated caption clipped for display
    pub display_caption: String,
    pub language: LanguageInfo,
    /// Absent when synthesis or playback checks failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioPayload>,
    pub download: DownloadPayload,
    pub notices: Vec<Notice>,
    pub state: RequestState,
    pub caption_model: String,
    pub translator: String,
    pub processing_time_ms: u64,
}

impl From<PipelineOutput> for CaptionResponse {
    fn from(output: PipelineOutput) -> Self {
        let download = output.download();

        Self {
            request_id: output.request_id.to_string(),
            image: ImageSummary {
                width: output.image.width,
                height: output.image.height,
                format: format_to_extension(output.image.format).to_string(),
            },
            audio: output.audio.as_ref().map(|clip| AudioPayload {
                mime_type: clip.mime_type().to_string(),
                data: clip.to_base64(),
            }),
            download: DownloadPayload {
                file_name: download.file_name.to_string(),
                mime_type: download.mime_type.to_string(),
                data: STANDARD.encode(&download.data),
            },
            caption: output.caption.text,
            confidence: output.caption.confidence,
            caption_model: output.caption.model,
            translated_caption: output.translated_caption,
            display_caption: output.display_caption,
            language: output.language.info(),
            notices: output.notices,
            state: output.state,
            translator: output.translator.to_string(),
            processing_time_ms: output.processing_time_ms,
        }
    }
}
