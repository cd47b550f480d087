// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Backend selection tests: Marian translation, VLM captions and the
//! service listing used by /health

use fabstir_caption_node::{
    config::NodeConfig,
    pipeline::{CaptionPipeline, CaptionServices, NoticeKind, PipelineError, RequestState},
    translation::Language,
};

use crate::common::{png_bytes, FakeBackends, FakeBehavior};

const CAT: &str = "a cat sleeping on a sofa";

fn marian_config(backends: &FakeBackends) -> NodeConfig {
    NodeConfig {
        translator_backend: "marian".to_string(),
        ..backends.config()
    }
}

#[tokio::test]
async fn test_marian_translates_per_language_model() {
    let behavior = FakeBehavior::captioning(CAT)
        .with_translation("de", "eine Katze schläft auf einem Sofa")
        .with_translation("ja", "ソファで寝ている猫");
    let backends = FakeBackends::spawn(behavior).await;
    let pipeline = CaptionPipeline::from_config(&marian_config(&backends)).unwrap();

    let german = pipeline
        .run_bytes(&png_bytes(10, 10), Language::German)
        .await
        .unwrap();
    assert_eq!(german.translated_caption, "eine Katze schläft auf einem Sofa");
    assert_eq!(german.translator, "marian");

    let japanese = pipeline
        .run_bytes(&png_bytes(10, 10), Language::Japanese)
        .await
        .unwrap();
    assert_eq!(japanese.translated_caption, "ソファで寝ている猫");
    assert_eq!(backends.translate_calls(), 2);
}

#[tokio::test]
async fn test_marian_without_punjabi_model_falls_back() {
    let backends = FakeBackends::spawn(FakeBehavior::captioning(CAT)).await;
    let pipeline = CaptionPipeline::from_config(&marian_config(&backends)).unwrap();

    let out = pipeline
        .run_bytes(&png_bytes(10, 10), Language::Punjabi)
        .await
        .unwrap();

    assert_eq!(out.translated_caption, CAT);
    assert!(out.has_notice(NoticeKind::TranslationError));
    assert_eq!(out.state, RequestState::RenderedWithError);
    // No model exists, so nothing is requested
    assert_eq!(backends.translate_calls(), 0);
}

#[tokio::test]
async fn test_google_uses_chinese_region_code() {
    let behavior = FakeBehavior::captioning(CAT).with_translation("zh-CN", "一只猫睡在沙发上");
    let backends = FakeBackends::spawn(behavior).await;
    let pipeline = CaptionPipeline::from_config(&backends.config()).unwrap();

    let out = pipeline
        .run_bytes(&png_bytes(10, 10), Language::Chinese)
        .await
        .unwrap();

    assert_eq!(out.translated_caption, "一只猫睡在沙发上");
    assert_eq!(
        backends.spoken(),
        vec![("一只猫睡在沙发上".to_string(), "zh-CN".to_string())]
    );
}

#[tokio::test]
async fn test_vlm_caption_backend() {
    let backends = FakeBackends::spawn(FakeBehavior::captioning(CAT)).await;
    let config = NodeConfig {
        caption_backend: "vlm".to_string(),
        caption_model: "qwen3-vl".to_string(),
        ..backends.config()
    };
    let pipeline = CaptionPipeline::from_config(&config).unwrap();

    let out = pipeline
        .run_bytes(&png_bytes(10, 10), Language::English)
        .await
        .unwrap();

    assert_eq!(out.caption.text, CAT);
    assert_eq!(out.caption.model, "qwen3-vl");
    assert_eq!(out.caption.confidence, None);
}

#[tokio::test]
async fn test_unknown_backend_is_model_load_error() {
    let config = NodeConfig {
        translator_backend: "deepl".to_string(),
        ..NodeConfig::default()
    };

    match CaptionPipeline::from_config(&config) {
        Err(err) => {
            assert!(matches!(err, PipelineError::ModelLoad(_)));
            assert_eq!(err.kind(), Some(NoticeKind::ModelLoadError));
        }
        Ok(_) => panic!("unknown translator backend should not build"),
    }
}

#[tokio::test]
async fn test_service_listing() {
    let backends = FakeBackends::spawn(FakeBehavior::captioning(CAT)).await;
    let services = CaptionServices::from_config(&backends.config()).unwrap();

    let listed = services.list_services().await;
    let types: Vec<_> = listed.iter().map(|s| s.service_type).collect();
    assert_eq!(types, vec!["caption", "translation", "speech"]);
    assert!(listed.iter().all(|s| s.available));
    assert_eq!(listed[1].name, "google");
}
