// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Caption endpoint handlers

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::Multipart;
use bytes::Bytes;
use tracing::debug;
use uuid::Uuid;

use super::request::{parse_language, CaptionRequest, DownloadRequest};
use super::response::CaptionResponse;
use crate::api::errors::{ApiError, RequestError};
use crate::api::http_server::AppState;
use crate::pipeline::CaptionDownload;

/// POST /v1/caption - Caption a base64 image and speak it in the chosen language
pub async fn caption_handler(
    State(state): State<AppState>,
    Json(request): Json<CaptionRequest>,
) -> Result<Json<CaptionResponse>, RequestError> {
    let request_id = Uuid::new_v4();
    caption_json(&state, request, request_id)
        .await
        .map(Json)
        .map_err(|e| e.for_request(request_id))
}

async fn caption_json(
    state: &AppState,
    request: CaptionRequest,
    request_id: Uuid,
) -> Result<CaptionResponse, ApiError> {
    let language = request.validate()?;
    let image = request.image.unwrap_or_default();

    let output = state
        .pipeline
        .run_base64_with_id(request_id, &image, language)
        .await?;
    Ok(output.into())
}

/// POST /v1/caption/upload - Same as /v1/caption for a multipart file upload
///
/// Fields: `image` (file), `language` (text, optional).
pub async fn caption_upload_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CaptionResponse>, RequestError> {
    let request_id = Uuid::new_v4();
    caption_multipart(&state, multipart, request_id)
        .await
        .map(Json)
        .map_err(|e| e.for_request(request_id))
}

async fn caption_multipart(
    state: &AppState,
    mut multipart: Multipart,
    request_id: Uuid,
) -> Result<CaptionResponse, ApiError> {
    let mut image: Option<Bytes> = None;
    let mut language: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidRequest(format!("malformed multipart body: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("image") => {
                let data = field.bytes().await.map_err(|e| {
                    ApiError::InvalidRequest(format!("failed to read image field: {}", e))
                })?;
                debug!("Upload image field: {} bytes", data.len());
                image = Some(data);
            }
            Some("language") => {
                language = Some(field.text().await.map_err(|e| {
                    ApiError::InvalidRequest(format!("failed to read language field: {}", e))
                })?);
            }
            other => debug!("Ignoring multipart field {:?}", other),
        }
    }

    let image = image
        .filter(|b| !b.is_empty())
        .ok_or_else(|| ApiError::ValidationError {
            field: "image".to_string(),
            message: "image file is required".to_string(),
        })?;
    let language = parse_language(language.as_deref())?;

    let output = state
        .pipeline
        .run_bytes_with_id(request_id, &image, language)
        .await?;
    Ok(output.into())
}

/// POST /v1/caption/download - Serve caption text as caption.txt
pub async fn download_handler(Json(request): Json<DownloadRequest>) -> Result<Response, ApiError> {
    request.validate()?;
    let download = CaptionDownload::from_text(&request.text);

    Ok((
        [
            (
                header::CONTENT_TYPE,
                format!("{}; charset=utf-8", download.mime_type),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", download.file_name),
            ),
        ],
        download.data,
    )
        .into_response())
}
