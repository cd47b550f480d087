// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod config;
pub mod pipeline;
pub mod speech;
pub mod translation;
pub mod utils;
pub mod version;
pub mod vision;

pub use config::NodeConfig;
pub use pipeline::{
    truncate, CaptionPipeline, CaptionServices, Notice, NoticeKind, PipelineError,
    PipelineOutput, RequestState,
};
pub use speech::{AudioClip, SpeechSynthesizer};
pub use translation::{Language, Translator};
pub use vision::{Caption, CaptionGenerator, LoadedImage};
