// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Mapper Error
//!
//! Discriminated error type shared by every layer of the mapper. An error is
//! built once where the failure happens and carries the HTTP status the
//! controller layer should answer with.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Error taxonomy (remote, transport, precondition, ...)

use serde_json::Value;

/// Failure classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Collaborator answered with a non-2xx status
    Remote,

    /// No response at all (connection refused, timeout, TLS, ...)
    Transport,

    /// Response arrived but could not be parsed
    Decode,

    /// Required source data is absent, the object cannot exist for this input
    PreconditionNotMet,

    /// Caller supplied a malformed identifier or parameter
    InvalidInput,

    /// Missing or rejected credentials
    Unauthorized,

    /// Local configuration is unusable
    Configuration,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Remote => "remote_error",
            ErrorKind::Transport => "transport_error",
            ErrorKind::Decode => "decode_error",
            ErrorKind::PreconditionNotMet => "precondition_not_met",
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Configuration => "configuration_error",
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct MapperError {
    pub kind: ErrorKind,
    pub http_status: u16,
    pub remote_body: Option<Value>,
    pub message: String,
}

impl MapperError {
    pub fn remote(status: u16, remote_body: Option<Value>, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Remote,
            http_status: status,
            remote_body,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Transport,
            http_status: 502,
            remote_body: None,
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Decode,
            http_status: 502,
            remote_body: None,
            message: message.into(),
        }
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::PreconditionNotMet,
            http_status: 404,
            remote_body: None,
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::InvalidInput,
            http_status: 400,
            remote_body: None,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Unauthorized,
            http_status: 401,
            remote_body: None,
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Configuration,
            http_status: 500,
            remote_body: None,
            message: message.into(),
        }
    }

    /// Prefix the message with the higher-level operation that failed.
    /// Kind, status and remote body are carried over unchanged.
    pub fn context(self, operation: impl AsRef<str>) -> Self {
        Self {
            message: format!("{}: {}", operation.as_ref(), self.message),
            ..self
        }
    }

    pub fn is_conflict(&self) -> bool {
        self.kind == ErrorKind::Remote && self.http_status == 409
    }

    /// The `error` field of a client-facing failure body
    pub fn error_detail(&self) -> Value {
        match &self.remote_body {
            Some(body) => body.clone(),
            None => Value::String(self.kind.as_str().to_string()),
        }
    }
}

impl From<reqwest::Error> for MapperError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            MapperError::decode(format!("Failed to parse response: {}", err))
        } else {
            MapperError::transport(format!("HTTP request failed: {}", err))
        }
    }
}

impl From<serde_json::Error> for MapperError {
    fn from(err: serde_json::Error) -> Self {
        MapperError::decode(format!("Failed to parse JSON: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_context_keeps_status_and_body() {
        let err = MapperError::remote(503, Some(json!({"error": "down"})), "HTTP 503")
            .context("Failed to get asset 7 from source");

        assert_eq!(err.http_status, 503);
        assert_eq!(err.kind, ErrorKind::Remote);
        assert_eq!(err.message, "Failed to get asset 7 from source: HTTP 503");
        assert_eq!(err.error_detail(), json!({"error": "down"}));
    }

    #[test]
    fn test_conflict_detection() {
        assert!(MapperError::remote(409, None, "exists").is_conflict());
        assert!(!MapperError::remote(404, None, "missing").is_conflict());
        assert!(!MapperError::precondition("missing spec").is_conflict());
    }

    #[test]
    fn test_precondition_is_404() {
        let err = MapperError::precondition("Required specification missing");
        assert_eq!(err.http_status, 404);
        assert_eq!(err.error_detail(), json!("precondition_not_met"));
    }
}
