// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Per-request state machine
//!
//! ```text
//! Idle ─▶ ImageReceived ─▶ Captioned ─▶ Translated ─▶ Truncated ─┬▶ AudioReady ─┬▶ Rendered
//!                                                               │              └▶ RenderedWithError
//!                                                               └▶ AudioFailed ──▶ RenderedWithError
//! Idle / ImageReceived ──decode or caption failure──▶ Failed
//! any non-terminal state ──timeout──▶ Failed
//! ```

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RequestState {
    #[default]
    Idle,
    ImageReceived,
    Captioned,
    Translated,
    Truncated,
    AudioReady,
    AudioFailed,
    Rendered,
    /// Rendered with partial results and at least one notice
    RenderedWithError,
    /// Nothing to render
    Failed,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid request state transition {from:?} -> {to:?}")]
pub struct InvalidTransition {
    pub from: RequestState,
    pub to: RequestState,
}

impl RequestState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestState::Rendered | RequestState::RenderedWithError | RequestState::Failed
        )
    }

    pub fn can_advance_to(&self, next: RequestState) -> bool {
        use RequestState::*;

        if next == Failed {
            return !self.is_terminal();
        }

        matches!(
            (self, next),
            (Idle, ImageReceived)
                | (ImageReceived, Captioned)
                | (Captioned, Translated)
                | (Translated, Truncated)
                | (Truncated, AudioReady)
                | (Truncated, AudioFailed)
                | (AudioReady, Rendered)
                | (AudioReady, RenderedWithError)
                | (AudioFailed, RenderedWithError)
        )
    }

    pub fn advance(self, next: RequestState) -> Result<RequestState, InvalidTransition> {
        if self.can_advance_to(next) {
            Ok(next)
        } else {
            Err(InvalidTransition {
                from: self,
                to: next,
            })
        }
    }
}
