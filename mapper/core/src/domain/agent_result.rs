// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Agent Operation Results
//!
//! The `{status, json}` envelope every agent operation resolves to, and the
//! multi-status aggregation used by every "for all assets/shells" batch.
//!
//! # Batch status policy
//!
//! | Successes | Failures | Status |
//! |-----------|----------|--------|
//! | yes | no | 200 |
//! | yes | yes | 207 |
//! | no | yes | 500 |
//! | no | no (empty batch) | 200 |
//!
//! The same policy is used by the source-side and the repository-side batches.

use serde::Serialize;
use serde_json::{json, Value};

use crate::domain::error::MapperError;

/// Operation envelope handed to the controller layer.
/// `status` follows HTTP semantics; `json` is the payload or `{message, error}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentOpResult {
    pub status: u16,
    pub json: Value,
}

impl AgentOpResult {
    pub fn ok<T: Serialize>(status: u16, payload: &T) -> Self {
        match serde_json::to_value(payload) {
            Ok(json) => Self { status, json },
            Err(e) => Self::failure(500, "Failed to serialize result", Value::String(e.to_string())),
        }
    }

    pub fn failure(status: u16, message: impl Into<String>, error: Value) -> Self {
        Self {
            status,
            json: json!({ "message": message.into(), "error": error }),
        }
    }

    pub fn from_error(err: &MapperError) -> Self {
        Self::failure(err.http_status, err.message.clone(), err.error_detail())
    }

    pub fn from_result<T: Serialize>(status: u16, result: Result<T, MapperError>) -> Self {
        match result {
            Ok(payload) => Self::ok(status, &payload),
            Err(e) => Self::from_error(&e),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn message(&self) -> Option<&str> {
        self.json.get("message").and_then(Value::as_str)
    }
}

/// Status of a batch given whether any success / any failure was seen
pub fn aggregate_status(success_found: bool, fail_found: bool) -> u16 {
    match (success_found, fail_found) {
        (true, false) => 200,
        (true, true) => 207,
        (false, true) => 500,
        (false, false) => 200,
    }
}

/// One failed batch item, in client-facing form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedItem {
    pub item: String,
    pub status: u16,
    pub message: String,
    pub error: Value,
}

impl FailedItem {
    pub fn from_error(item: impl Into<String>, err: &MapperError) -> Self {
        Self {
            item: item.into(),
            status: err.http_status,
            message: err.message.clone(),
            error: err.error_detail(),
        }
    }

    pub fn from_op_result(item: impl Into<String>, result: &AgentOpResult) -> Self {
        Self {
            item: item.into(),
            status: result.status,
            message: result.message().unwrap_or("Operation failed").to_string(),
            error: result.json.get("error").cloned().unwrap_or(Value::Null),
        }
    }
}

/// Aggregated outcome of a batch. Both lists keep the input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchOutcome<T> {
    pub status: u16,
    pub successful: Vec<T>,
    pub failed: Vec<FailedItem>,
}

impl<T> BatchOutcome<T> {
    /// Split `(label, result)` pairs into successes and failures
    pub fn from_results<I>(results: I) -> Self
    where
        I: IntoIterator<Item = (String, Result<T, MapperError>)>,
    {
        let mut successful = Vec::new();
        let mut failed = Vec::new();
        for (label, result) in results {
            match result {
                Ok(value) => successful.push(value),
                Err(e) => failed.push(FailedItem::from_error(label, &e)),
            }
        }
        Self::new(successful, failed)
    }

    pub fn new(successful: Vec<T>, failed: Vec<FailedItem>) -> Self {
        let status = aggregate_status(!successful.is_empty(), !failed.is_empty());
        Self { status, successful, failed }
    }

    pub fn all_failed(&self) -> bool {
        self.successful.is_empty() && !self.failed.is_empty()
    }
}

impl BatchOutcome<Value> {
    /// Split labelled operation envelopes; any 2xx (207 included) counts as a
    /// success and contributes its payload
    pub fn from_op_results<I>(results: I) -> Self
    where
        I: IntoIterator<Item = (String, AgentOpResult)>,
    {
        let mut successful = Vec::new();
        let mut failed = Vec::new();
        for (label, result) in results {
            if result.is_success() {
                successful.push(result.json);
            } else {
                failed.push(FailedItem::from_op_result(label, &result));
            }
        }
        Self::new(successful, failed)
    }
}

impl<T: Serialize> BatchOutcome<T> {
    /// Envelope with `{successful, failed}`, or a single aggregate error when
    /// nothing succeeded
    pub fn into_op_result(self, label: &str) -> AgentOpResult {
        if self.all_failed() {
            let message = format!("All {} {} operations failed", self.failed.len(), label);
            return AgentOpResult::failure(self.status, message, json!({ "failed": self.failed }));
        }
        AgentOpResult {
            status: self.status,
            json: json!({
                "successful": serde_json::to_value(&self.successful).unwrap_or(Value::Null),
                "failed": self.failed,
            }),
        }
    }
}
