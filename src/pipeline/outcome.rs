// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Pipeline results, notices and fatal errors

use std::time::Duration;

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use super::state::{InvalidTransition, RequestState};
use crate::speech::AudioClip;
use crate::translation::Language;
use crate::vision::{Caption, CaptionError, ImageError, ImageInfo};

pub const CAPTION_FILE_NAME: &str = "caption.txt";
pub const CAPTION_MIME_TYPE: &str = "text/plain";

/// Category of a user-visible error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NoticeKind {
    ImageDecodeError,
    ModelLoadError,
    CaptionGenerationError,
    TranslationError,
    AudioSynthesisError,
    AudioPlaybackError,
}

/// Non-fatal problem reported next to partial results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Errors that stop a request before anything can be rendered
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Error processing image: {0}")]
    ImageDecode(#[from] ImageError),

    #[error("Error loading models: {0}")]
    ModelLoad(String),

    #[error("Error generating caption: {0}")]
    CaptionGeneration(#[from] CaptionError),

    #[error("Request exceeded the {}s processing limit", .0.as_secs())]
    Timeout(Duration),

    #[error(transparent)]
    State(#[from] InvalidTransition),
}

impl PipelineError {
    /// Notice category for this error, if it is one the user should see
    pub fn kind(&self) -> Option<NoticeKind> {
        match self {
            PipelineError::ImageDecode(_) => Some(NoticeKind::ImageDecodeError),
            PipelineError::ModelLoad(_) => Some(NoticeKind::ModelLoadError),
            PipelineError::CaptionGeneration(_) => Some(NoticeKind::CaptionGenerationError),
            PipelineError::Timeout(_) | PipelineError::State(_) => None,
        }
    }
}

/// Downloadable plain-text caption
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionDownload {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub data: Bytes,
}

impl CaptionDownload {
    /// UTF-8 encode `text` exactly as given
    pub fn from_text(text: &str) -> Self {
        Self {
            file_name: CAPTION_FILE_NAME,
            mime_type: CAPTION_MIME_TYPE,
            data: Bytes::copy_from_slice(text.as_bytes()),
        }
    }
}

/// Everything one pipeline run produced
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub request_id: Uuid,
    pub image: ImageInfo,
    /// English caption straight from the model
    pub caption: Caption,
    pub language: Language,
    /// Full translated caption, or the English caption after a translation failure
    pub translated_caption: String,
    /// `translated_caption` clipped for display and speech
    pub display_caption: String,
    pub audio: Option<AudioClip>,
    pub notices: Vec<Notice>,
    pub state: RequestState,
    pub translator: &'static str,
    pub processing_time_ms: u64,
}

impl PipelineOutput {
    /// The caption file offered for download
    ///
    /// Holds the full translated caption, not the display text.
    pub fn download(&self) -> CaptionDownload {
        CaptionDownload::from_text(&self.translated_caption)
    }

    pub fn has_notice(&self, kind: NoticeKind) -> bool {
        self.notices.iter().any(|n| n.kind == kind)
    }
}
