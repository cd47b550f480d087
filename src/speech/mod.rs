// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Text-to-speech for captions
//!
//! Audio is kept in memory as MP3 bytes and handed straight to the caller.

pub mod chunking;
pub mod google_tts;
pub mod provider;
pub mod types;

pub use chunking::{split_for_tts, MAX_CHUNK_CHARS};
pub use google_tts::{GoogleTtsClient, DEFAULT_TTS_ENDPOINT};
pub use provider::SpeechSynthesizer;
pub use types::{AudioClip, AudioPlaybackError, SpeechError, MP3_MIME_TYPE};
