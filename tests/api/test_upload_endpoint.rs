// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /v1/caption/upload tests (multipart)

use axum::http::StatusCode;

use super::helpers::{multipart_request, router_for, send};
use crate::common::{jpeg_bytes, png_bytes, FakeBehavior};

const BIKE: &str = "a red bicycle leaning against a wall";

#[tokio::test]
async fn test_upload_with_language() {
    let behavior =
        FakeBehavior::captioning(BIKE).with_translation("de", "ein rotes Fahrrad an einer Wand");
    let (_backends, router) = router_for(behavior).await;

    let image = jpeg_bytes(64, 64);
    let response = send(router, multipart_request(Some(&image), Some("German"))).await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    assert_eq!(body["caption"], BIKE);
    assert_eq!(body["translatedCaption"], "ein rotes Fahrrad an einer Wand");
    assert_eq!(body["image"]["format"], "jpg");
    assert_eq!(body["language"]["code"], "de");
}

#[tokio::test]
async fn test_upload_without_language_is_english() {
    let (_backends, router) = router_for(FakeBehavior::captioning(BIKE)).await;

    let image = png_bytes(16, 16);
    let response = send(router, multipart_request(Some(&image), None)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["translatedCaption"], BIKE);
}

#[tokio::test]
async fn test_upload_missing_image_field() {
    let (_backends, router) = router_for(FakeBehavior::captioning(BIKE)).await;

    let response = send(router, multipart_request(None, Some("French"))).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let body = response.json();
    assert_eq!(body["details"]["field"], "image");
    assert!(body["requestId"].as_str().is_some());
}

#[tokio::test]
async fn test_upload_corrupted_file() {
    let (backends, router) = router_for(FakeBehavior::captioning(BIKE)).await;

    let mut image = png_bytes(16, 16);
    image.truncate(30);
    let response = send(router, multipart_request(Some(&image), Some("French"))).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["errorType"], "image_decode_error");
    assert!(backends.spoken().is_empty());
}
