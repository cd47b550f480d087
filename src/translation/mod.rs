// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Caption translation
//!
//! Two interchangeable backends behind one [`Translator`] trait:
//! - Google Translate web endpoint (one model, any language)
//! - MarianMT models on the Hugging Face Inference API (one model per language)

pub mod google;
pub mod language;
pub mod marian;
pub mod provider;

pub use google::{GoogleTranslateClient, DEFAULT_TRANSLATE_ENDPOINT};
pub use language::{Language, LanguageInfo, UnknownLanguage};
pub use marian::{MarianTranslator, DEFAULT_MARIAN_ENDPOINT};
pub use provider::{TranslationError, Translator};
