// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use reqwest::Response;
use serde_json::Value;
use tracing::debug;

use crate::domain::error::MapperError;

/// Pass 2xx responses through; turn anything else into a remote error that
/// carries the status and the (JSON if possible) body
pub(crate) async fn check_status(response: Response, operation: &str) -> Result<Response, MapperError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    debug!(operation, status = status.as_u16(), body = %text, "Remote call failed");
    let body = if text.is_empty() {
        None
    } else {
        Some(serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text)))
    };

    Err(MapperError::remote(
        status.as_u16(),
        body,
        format!("{} returned HTTP {}", operation, status.as_u16()),
    ))
}

pub(crate) fn join_url(endpoint: &str, path: &str) -> String {
    format!("{}/{}", endpoint.trim_end_matches('/'), path.trim_start_matches('/'))
}
