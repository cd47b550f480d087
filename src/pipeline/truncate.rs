// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Display-length truncation for captions

/// Default display length of a caption, in chars
pub const DEFAULT_MAX_CAPTION_LENGTH: usize = 200;

/// Marker appended to clipped text
pub const ELLIPSIS: &str = "...";

/// Clip `text` to `max_length` chars, appending [`ELLIPSIS`] when anything was cut
///
/// Length is counted in chars so multi-byte scripts are never split inside a
/// code point.
pub fn truncate(text: &str, max_length: usize) -> String {
    match text.char_indices().nth(max_length) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
    }
}
