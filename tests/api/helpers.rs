// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body, Bytes},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use fabstir_caption_node::{
    api::{create_router, AppState},
    pipeline::CaptionPipeline,
};
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`

use crate::common::{FakeBackends, FakeBehavior};

pub const BOUNDARY: &str = "caption-test-boundary";

/// Router wired to a fresh set of fake backends
pub async fn router_for(behavior: FakeBehavior) -> (FakeBackends, Router) {
    let backends = FakeBackends::spawn(behavior).await;
    let pipeline = CaptionPipeline::from_config(&backends.config()).unwrap();
    let router = create_router(AppState {
        pipeline: Arc::new(pipeline),
    });
    (backends, router)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

pub async fn send(router: Router, request: Request<Body>) -> TestResponse {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// multipart/form-data body with an optional image file and language field
pub fn multipart_request(image: Option<&[u8]>, language: Option<&str>) -> Request<Body> {
    let mut body = Vec::new();

    if let Some(image) = image {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"upload.png\"\r\nContent-Type: image/png\r\n\r\n",
                BOUNDARY
            )
            .as_bytes(),
        );
        body.extend_from_slice(image);
        body.extend_from_slice(b"\r\n");
    }

    if let Some(language) = language {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"language\"\r\n\r\n{}\r\n",
                BOUNDARY, language
            )
            .as_bytes(),
        );
    }

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/v1/caption/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}
