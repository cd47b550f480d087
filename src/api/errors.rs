// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::pipeline::PipelineError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
    pub request_id: Option<String>,
    pub details: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Clone)]
pub enum ApiError {
    NotFound(String),
    InvalidRequest(String),
    ValidationError { field: String, message: String },
    ImageDecode(String),
    ModelLoad(String),
    CaptionGeneration(String),
    InternalError(String),
    Timeout { limit_secs: u64 },
}

impl ApiError {
    pub fn to_response(&self, request_id: Option<String>) -> ErrorResponse {
        let (error_type, message, details) = match self {
            ApiError::NotFound(msg) => ("not_found", msg.clone(), None),
            ApiError::InvalidRequest(msg) => ("invalid_request", msg.clone(), None),
            ApiError::ValidationError { field, message } => {
                let mut details = HashMap::new();
                details.insert(
                    "field".to_string(),
                    serde_json::Value::String(field.clone()),
                );
                ("validation_error", message.clone(), Some(details))
            }
            ApiError::ImageDecode(msg) => ("image_decode_error", msg.clone(), None),
            ApiError::ModelLoad(msg) => ("model_load_error", msg.clone(), None),
            ApiError::CaptionGeneration(msg) => ("caption_generation_error", msg.clone(), None),
            ApiError::InternalError(msg) => ("internal_error", msg.clone(), None),
            ApiError::Timeout { limit_secs } => {
                let mut details = HashMap::new();
                details.insert(
                    "limit_secs".to_string(),
                    serde_json::Value::Number((*limit_secs).into()),
                );
                ("timeout", "Request timed out".to_string(), Some(details))
            }
        };

        ErrorResponse {
            error_type: error_type.to_string(),
            message,
            request_id,
            details,
        }
    }

    /// Tie this error to a request so the body carries its id
    pub fn for_request(self, request_id: impl ToString) -> RequestError {
        RequestError {
            request_id: Some(request_id.to_string()),
            error: self,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::NotFound(_) => 404,
            ApiError::InvalidRequest(_)
            | ApiError::ValidationError { .. }
            | ApiError::ImageDecode(_) => 400,
            ApiError::ModelLoad(_) => 503,
            ApiError::CaptionGeneration(_) => 502,
            ApiError::InternalError(_) => 500,
            ApiError::Timeout { .. } => 504,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ApiError::ValidationError { field, message } => {
                write!(f, "Validation error for {}: {}", field, message)
            }
            ApiError::ImageDecode(msg) => write!(f, "{}", msg),
            ApiError::ModelLoad(msg) => write!(f, "{}", msg),
            ApiError::CaptionGeneration(msg) => write!(f, "{}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Timeout { limit_secs } => {
                write!(f, "Request timed out after {} seconds", limit_secs)
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<PipelineError> for ApiError {
    fn from(e: PipelineError) -> Self {
        let message = e.to_string();
        match e {
            PipelineError::ImageDecode(_) => ApiError::ImageDecode(message),
            PipelineError::ModelLoad(_) => ApiError::ModelLoad(message),
            PipelineError::CaptionGeneration(_) => ApiError::CaptionGeneration(message),
            PipelineError::Timeout(limit) => ApiError::Timeout {
                limit_secs: limit.as_secs(),
            },
            PipelineError::State(_) => ApiError::InternalError(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        RequestError::from(self).into_response()
    }
}

/// An [`ApiError`] raised while serving a request with a known id
#[derive(Debug)]
pub struct RequestError {
    pub request_id: Option<String>,
    pub error: ApiError,
}

impl From<ApiError> for RequestError {
    fn from(error: ApiError) -> Self {
        Self {
            request_id: None,
            error,
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.error.to_response(self.request_id))).into_response()
    }
}
