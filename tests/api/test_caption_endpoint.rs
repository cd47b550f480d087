// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /v1/caption tests

use axum::http::StatusCode;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::json;

use super::helpers::{json_request, router_for, send};
use crate::common::{png_bytes, FakeBehavior};

const DOG: &str = "a dog sitting on the grass";
const DOG_FR: &str = "un chien assis sur l'herbe";

#[tokio::test]
async fn test_caption_french() {
    let behavior = FakeBehavior::captioning(DOG).with_translation("fr", DOG_FR);
    let (_backends, router) = router_for(behavior).await;

    let request = json_request(
        "/v1/caption",
        json!({ "image": STANDARD.encode(png_bytes(50, 40)), "language": "French" }),
    );
    let response = send(router, request).await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    assert_eq!(body["caption"], DOG);
    assert_eq!(body["translatedCaption"], DOG_FR);
    assert_eq!(body["displayCaption"], DOG_FR);
    assert_eq!(body["language"]["name"], "French");
    assert_eq!(body["language"]["code"], "fr");
    assert_eq!(body["image"]["width"], 50);
    assert_eq!(body["image"]["height"], 40);
    assert_eq!(body["image"]["format"], "png");
    assert_eq!(body["audio"]["mimeType"], "audio/mp3");
    assert_eq!(body["download"]["fileName"], "caption.txt");
    assert_eq!(body["download"]["data"], STANDARD.encode(DOG_FR));
    assert_eq!(body["state"], "rendered");
    assert_eq!(body["translator"], "google");
    assert!(body["notices"].as_array().unwrap().is_empty());
    assert!(body["requestId"].as_str().is_some());
}

#[tokio::test]
async fn test_caption_defaults_to_english() {
    let (backends, router) = router_for(FakeBehavior::captioning(DOG)).await;

    let data_url = format!("data:image/png;base64,{}", STANDARD.encode(png_bytes(8, 8)));
    let response = send(router, json_request("/v1/caption", json!({ "image": data_url }))).await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    assert_eq!(body["language"]["code"], "en");
    assert_eq!(body["translatedCaption"], DOG);
    assert_eq!(backends.translate_calls(), 0);
}

#[tokio::test]
async fn test_translation_failure_reported_as_notice() {
    let behavior = FakeBehavior {
        translate_fails: true,
        ..FakeBehavior::captioning(DOG)
    };
    let (_backends, router) = router_for(behavior).await;

    let request = json_request(
        "/v1/caption",
        json!({ "image": STANDARD.encode(png_bytes(8, 8)), "language": "Spanish" }),
    );
    let response = send(router, request).await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    assert_eq!(body["translatedCaption"], DOG);
    assert_eq!(body["state"], "renderedWithError");
    assert_eq!(body["notices"][0]["kind"], "translationError");
    assert!(body["audio"].is_object());
}

#[tokio::test]
async fn test_invalid_image_returns_400() {
    let (_backends, router) = router_for(FakeBehavior::captioning(DOG)).await;

    let request = json_request(
        "/v1/caption",
        json!({ "image": STANDARD.encode(b"definitely not an image"), "language": "French" }),
    );
    let response = send(router, request).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["errorType"], "image_decode_error");
}

#[tokio::test]
async fn test_invalid_base64_returns_400() {
    let (_backends, router) = router_for(FakeBehavior::captioning(DOG)).await;

    let response = send(
        router,
        json_request("/v1/caption", json!({ "image": "%%% not base64 %%%" })),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["errorType"], "image_decode_error");
}

#[tokio::test]
async fn test_missing_image_returns_validation_error() {
    let (_backends, router) = router_for(FakeBehavior::captioning(DOG)).await;

    let response = send(router, json_request("/v1/caption", json!({ "language": "French" }))).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let body = response.json();
    assert_eq!(body["errorType"], "validation_error");
    assert_eq!(body["details"]["field"], "image");
}

#[tokio::test]
async fn test_unknown_language_returns_validation_error() {
    let (_backends, router) = router_for(FakeBehavior::captioning(DOG)).await;

    let request = json_request(
        "/v1/caption",
        json!({ "image": STANDARD.encode(png_bytes(8, 8)), "language": "Klingon" }),
    );
    let response = send(router, request).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["details"]["field"], "language");
}

#[tokio::test]
async fn test_caption_backend_failure_returns_502() {
    let (_backends, router) = router_for(FakeBehavior::default()).await;

    let request = json_request(
        "/v1/caption",
        json!({ "image": STANDARD.encode(png_bytes(8, 8)) }),
    );
    let response = send(router, request).await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    let body = response.json();
    assert_eq!(body["errorType"], "caption_generation_error");
    let request_id = body["requestId"].as_str().unwrap();
    assert!(uuid::Uuid::parse_str(request_id).is_ok());
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Error generating caption"));
}
