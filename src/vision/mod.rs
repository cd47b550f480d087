// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision side of the caption pipeline
//!
//! This module provides:
//! - Image loading (PNG/JPEG to RGB8)
//! - Captioning via a hosted image-to-text model or a VLM sidecar

pub mod caption;
pub mod hf_client;
pub mod image_utils;
pub mod vlm_client;

pub use caption::{Caption, CaptionError, CaptionGenerator};
pub use hf_client::{HfCaptionClient, DEFAULT_CAPTION_MODEL};
pub use image_utils::{
    decode_base64_image, decode_image_bytes, detect_format, format_to_extension, ImageError,
    ImageInfo, LoadedImage, DEFAULT_MAX_IMAGE_SIZE,
};
pub use vlm_client::VlmCaptionClient;
