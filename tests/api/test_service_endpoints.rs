// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! GET /health and GET /v1/languages tests

use axum::http::StatusCode;

use super::helpers::{get_request, router_for, send};
use crate::common::FakeBehavior;

#[tokio::test]
async fn test_health_lists_backends() {
    let (_backends, router) = router_for(FakeBehavior::default()).await;

    let response = send(router, get_request("/health")).await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["build"]["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["build"]["features"]
        .as_array()
        .unwrap()
        .iter()
        .any(|f| f == "multipart-upload"));

    let services = body["services"].as_array().unwrap();
    assert_eq!(services.len(), 3);
    assert_eq!(services[0]["serviceType"], "caption");
    assert_eq!(services[0]["name"], "Salesforce/blip-image-captioning-large");
}

#[tokio::test]
async fn test_languages_closed_set() {
    let (_backends, router) = router_for(FakeBehavior::default()).await;

    let response = send(router, get_request("/v1/languages")).await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    let names: Vec<&str> = body["languages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["name"].as_str().unwrap())
        .collect();

    assert_eq!(
        names,
        vec!["English", "Spanish", "French", "German", "Chinese", "Japanese", "Hindi", "Punjabi"]
    );
    assert_eq!(body["default"]["code"], "en");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (_backends, router) = router_for(FakeBehavior::default()).await;

    let response = send(router, get_request("/v1/describe-image")).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
