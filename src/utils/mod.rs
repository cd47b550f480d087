// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod http;

pub use http::{build_http_client, BROWSER_USER_AGENT};
