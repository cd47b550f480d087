// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image loading for the caption pipeline
//!
//! Uploads are accepted as PNG or JPEG only. The format is detected from
//! magic bytes, never from a filename or content-type hint.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{ImageFormat, RgbImage};
use thiserror::Error;

/// Default maximum upload size (10MB)
pub const DEFAULT_MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// Custom error types for image processing
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Image data is too large: {0} bytes (max: {1} bytes)")]
    TooLarge(usize, usize),

    #[error("Invalid base64 encoding: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("Unsupported image format (expected PNG or JPEG)")]
    UnsupportedFormat,

    #[error("Failed to decode image: {0}")]
    DecodeFailed(String),

    #[error("Failed to encode image: {0}")]
    EncodeFailed(String),

    #[error("Image data is empty")]
    EmptyData,
}

/// Image information extracted during loading
#[derive(Debug, Clone)]
pub struct ImageInfo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Detected format
    pub format: ImageFormat,
    /// Size of the uploaded bytes
    pub size_bytes: usize,
}

/// A decoded upload: RGB8 pixels plus what we learned while loading
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub pixels: RgbImage,
    pub info: ImageInfo,
}

impl LoadedImage {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Number of colour channels in the decoded bitmap (always 3)
    pub fn channels(&self) -> u8 {
        use image::Pixel;
        image::Rgb::<u8>::CHANNEL_COUNT
    }

    /// Re-encode the bitmap as PNG for backends that take encoded bytes
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, ImageError> {
        let mut buffer = Cursor::new(Vec::new());
        self.pixels
            .write_to(&mut buffer, ImageFormat::Png)
            .map_err(|e| ImageError::EncodeFailed(e.to_string()))?;
        Ok(buffer.into_inner())
    }
}

/// Decode a base64-encoded upload
///
/// # Example
/// ```ignore
/// let image = decode_base64_image("iVBORw0KGgo...", DEFAULT_MAX_IMAGE_SIZE)?;
/// println!("Image size: {}x{}", image.width(), image.height());
/// ```
pub fn decode_base64_image(base64_str: &str, max_size: usize) -> Result<LoadedImage, ImageError> {
    if base64_str.is_empty() {
        return Err(ImageError::EmptyData);
    }

    // Accept data URLs as well as bare base64
    let payload = match base64_str.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => base64_str,
    };

    let bytes = STANDARD.decode(payload.trim())?;
    decode_image_bytes(&bytes, max_size)
}

/// Decode raw image bytes (multipart uploads and local files) into RGB8
pub fn decode_image_bytes(bytes: &[u8], max_size: usize) -> Result<LoadedImage, ImageError> {
    if bytes.len() > max_size {
        return Err(ImageError::TooLarge(bytes.len(), max_size));
    }

    if bytes.is_empty() {
        return Err(ImageError::EmptyData);
    }

    let format = detect_format(bytes)?;

    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| ImageError::DecodeFailed(e.to_string()))?;

    let pixels = img.to_rgb8();
    let info = ImageInfo {
        width: pixels.width(),
        height: pixels.height(),
        format,
        size_bytes: bytes.len(),
    };

    Ok(LoadedImage { pixels, info })
}

/// Detect image format from magic bytes
///
/// Only the two upload formats are recognised.
pub fn detect_format(bytes: &[u8]) -> Result<ImageFormat, ImageError> {
    if bytes.len() < 4 {
        return Err(ImageError::UnsupportedFormat);
    }

    match bytes {
        // PNG: 89 50 4E 47 (0x89 P N G)
        [0x89, 0x50, 0x4E, 0x47, ..] => Ok(ImageFormat::Png),

        // JPEG: FF D8 FF
        [0xFF, 0xD8, 0xFF, ..] => Ok(ImageFormat::Jpeg),

        _ => Err(ImageError::UnsupportedFormat),
    }
}

/// Get the format extension as a string
pub fn format_to_extension(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "png",
        ImageFormat::Jpeg => "jpg",
        _ => "unknown",
    }
}
