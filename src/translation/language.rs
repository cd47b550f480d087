// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Supported caption languages

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of languages a caption can be translated and spoken in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
    German,
    Chinese,
    Japanese,
    Hindi,
    Punjabi,
}

impl Language {
    /// Every supported language, in display order
    pub const ALL: [Language; 8] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Chinese,
        Language::Japanese,
        Language::Hindi,
        Language::Punjabi,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Chinese => "Chinese",
            Language::Japanese => "Japanese",
            Language::Hindi => "Hindi",
            Language::Punjabi => "Punjabi",
        }
    }

    /// Language code understood by the translation and TTS services
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
            Language::Chinese => "zh-CN",
            Language::Japanese => "ja",
            Language::Hindi => "hi",
            Language::Punjabi => "pa",
        }
    }

    pub fn is_english(&self) -> bool {
        matches!(self, Language::English)
    }

    pub fn info(&self) -> LanguageInfo {
        LanguageInfo {
            name: self.display_name().to_string(),
            code: self.code().to_string(),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Error for language names outside the supported set
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unsupported language '{0}'")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    /// Accepts a display name (any case) or a language code
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Language::ALL
            .iter()
            .copied()
            .find(|lang| {
                lang.display_name().eq_ignore_ascii_case(wanted)
                    || lang.code().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

/// Serializable name/code pair for API responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageInfo {
    pub name: String,
    pub code: String,
}
