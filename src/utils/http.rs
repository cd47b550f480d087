// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared HTTP client construction for the backend clients

use anyhow::Result;
use reqwest::{header, Client};
use std::time::Duration;

/// Some public Google endpoints only answer browser clients
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Build a reqwest client with a request timeout, an optional bearer token
/// and an optional user agent
pub fn build_http_client(
    api_token: Option<&str>,
    user_agent: Option<&str>,
    timeout: Duration,
) -> Result<Client> {
    let mut headers = header::HeaderMap::new();
    if let Some(agent) = user_agent {
        headers.insert(header::USER_AGENT, header::HeaderValue::from_str(agent)?);
    }
    if let Some(token) = api_token.filter(|t| !t.is_empty()) {
        let mut value = header::HeaderValue::from_str(&format!("Bearer {}", token))?;
        value.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, value);
    }

    Ok(Client::builder()
        .timeout(timeout)
        .default_headers(headers)
        .build()?)
}
