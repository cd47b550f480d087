// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared test helpers: in-process fake backends and test images
#![allow(dead_code)]

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use fabstir_caption_node::config::NodeConfig;
use serde_json::json;
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

/// Minimal MP3 payload: ID3v2 header followed by one frame sync
pub const FAKE_MP3: &[u8] = b"ID3\x04\x00\x00\x00\x00\x00\x00\xFF\xFBfake-frames";

/// How the fake services answer
#[derive(Debug, Clone, Default)]
pub struct FakeBehavior {
    /// Caption returned by the image-to-text model; None answers 500
    pub caption: Option<&'static str>,
    /// Translations keyed by target language code
    pub translations: Vec<(&'static str, &'static str)>,
    pub translate_fails: bool,
    pub tts_fails: bool,
}

impl FakeBehavior {
    pub fn captioning(caption: &'static str) -> Self {
        Self {
            caption: Some(caption),
            ..Self::default()
        }
    }

    pub fn with_translation(mut self, code: &'static str, text: &'static str) -> Self {
        self.translations.push((code, text));
        self
    }
}

#[derive(Clone)]
struct FakeState {
    behavior: FakeBehavior,
    tts_requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
    translate_calls: Arc<Mutex<usize>>,
}

/// Fake caption, translation and TTS services on one ephemeral port
pub struct FakeBackends {
    pub base_url: String,
    tts_requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
    translate_calls: Arc<Mutex<usize>>,
}

impl FakeBackends {
    pub async fn spawn(behavior: FakeBehavior) -> Self {
        let state = FakeState {
            behavior,
            tts_requests: Arc::new(Mutex::new(Vec::new())),
            translate_calls: Arc::new(Mutex::new(0)),
        };
        let tts_requests = state.tts_requests.clone();
        let translate_calls = state.translate_calls.clone();

        let app = Router::new()
            .route("/models/*model", post(hf_model))
            .route("/v1/chat/completions", post(vlm_chat))
            .route("/translate_a/single", get(google_translate))
            .route("/translate_tts", get(google_tts))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            tts_requests,
            translate_calls,
        }
    }

    /// Node config pointing every backend at this server
    pub fn config(&self) -> NodeConfig {
        NodeConfig {
            caption_endpoint: self.base_url.clone(),
            translate_endpoint: self.base_url.clone(),
            marian_endpoint: self.base_url.clone(),
            tts_endpoint: self.base_url.clone(),
            service_timeout_secs: 5,
            pipeline_timeout_secs: 15,
            ..NodeConfig::default()
        }
    }

    /// Text and language of every TTS chunk requested so far
    pub fn spoken(&self) -> Vec<(String, String)> {
        self.tts_requests
            .lock()
            .unwrap()
            .iter()
            .map(|q| (q["q"].clone(), q["tl"].clone()))
            .collect()
    }

    pub fn translate_calls(&self) -> usize {
        *self.translate_calls.lock().unwrap()
    }
}

async fn hf_model(State(state): State<FakeState>, Path(model): Path<String>, body: Bytes) -> Response {
    if let Some(suffix) = model.strip_prefix("Helsinki-NLP/opus-mt-en-") {
        *state.translate_calls.lock().unwrap() += 1;
        if state.behavior.translate_fails {
            return (StatusCode::SERVICE_UNAVAILABLE, "model is loading").into_response();
        }
        let code = if suffix == "jap" { "ja" } else { suffix };
        return match lookup(&state.behavior, code) {
            Some(text) => Json(json!([{ "translation_text": text }])).into_response(),
            None => (StatusCode::NOT_FOUND, "no such model").into_response(),
        };
    }

    if !body.starts_with(&[0x89, b'P', b'N', b'G']) {
        return (StatusCode::BAD_REQUEST, "expected a PNG body").into_response();
    }
    match state.behavior.caption {
        Some(text) => Json(json!([{ "generated_text": text }])).into_response(),
        None => (StatusCode::INTERNAL_SERVER_ERROR, "model crashed").into_response(),
    }
}

async fn vlm_chat(State(state): State<FakeState>) -> Response {
    match state.behavior.caption {
        Some(text) => {
            Json(json!({ "choices": [{ "message": { "role": "assistant", "content": text } }] }))
                .into_response()
        }
        None => (StatusCode::INTERNAL_SERVER_ERROR, "model crashed").into_response(),
    }
}

async fn google_translate(
    State(state): State<FakeState>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    *state.translate_calls.lock().unwrap() += 1;
    if state.behavior.translate_fails {
        return (StatusCode::SERVICE_UNAVAILABLE, "translation unavailable").into_response();
    }

    let target = query.get("tl").map(String::as_str).unwrap_or_default();
    let source = query.get("q").cloned().unwrap_or_default();
    match lookup(&state.behavior, target) {
        Some(text) => Json(json!([[[text, source, null, null, 1]], null, "en"])).into_response(),
        None => (StatusCode::BAD_REQUEST, "unknown target").into_response(),
    }
}

async fn google_tts(
    State(state): State<FakeState>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.tts_requests.lock().unwrap().push(query);
    if state.behavior.tts_fails {
        return (StatusCode::INTERNAL_SERVER_ERROR, "tts failed").into_response();
    }
    ([(header::CONTENT_TYPE, "audio/mpeg")], Bytes::from_static(FAKE_MP3)).into_response()
}

fn lookup(behavior: &FakeBehavior, code: &str) -> Option<&'static str> {
    behavior
        .translations
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, text)| *text)
}

/// Solid-colour PNG of the given size
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, image::ImageFormat::Png)
}

/// Solid-colour JPEG of the given size
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, image::ImageFormat::Jpeg)
}

fn encode(width: u32, height: u32, format: image::ImageFormat) -> Vec<u8> {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, 90])
    });
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, format).unwrap();
    buffer.into_inner()
}
