// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Caption API endpoint module
//!
//! Provides POST /v1/caption, /v1/caption/upload and /v1/caption/download.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{caption_handler, caption_upload_handler, download_handler};
pub use request::{parse_language, CaptionRequest, DownloadRequest};
pub use response::{AudioPayload, CaptionResponse, DownloadPayload, ImageSummary};
