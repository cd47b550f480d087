// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Request pipeline: image in, caption text and speech out

pub mod outcome;
pub mod runner;
pub mod services;
pub mod state;
pub mod truncate;

pub use outcome::{
    CaptionDownload, Notice, NoticeKind, PipelineError, PipelineOutput, CAPTION_FILE_NAME,
    CAPTION_MIME_TYPE,
};
pub use runner::{CaptionPipeline, PipelineSettings};
pub use services::{CaptionServices, ServiceInfo};
pub use state::{InvalidTransition, RequestState};
pub use truncate::{truncate, DEFAULT_MAX_CAPTION_LENGTH, ELLIPSIS};
