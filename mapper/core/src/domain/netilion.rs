// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Netilion Source Records
//!
//! Read-only records as the Netilion REST API returns them. Only the fields
//! the mapper consumes are modelled; everything else is ignored on decode.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// `{id, href}` link to another Netilion resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetilionRef {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetilionAsset {
    pub id: u64,

    #[serde(default)]
    pub serial_number: Option<String>,

    #[serde(default)]
    pub production_date: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub last_seen_at: Option<String>,

    #[serde(default)]
    pub status: Option<NetilionRef>,

    #[serde(default)]
    pub product: Option<NetilionRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetilionProduct {
    pub id: u64,

    #[serde(default)]
    pub product_code: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub manufacturer: Option<NetilionRef>,

    #[serde(default)]
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetilionManufacturer {
    pub id: u64,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub street: Option<String>,

    #[serde(default)]
    pub street_number: Option<String>,

    #[serde(default)]
    pub zip_code: Option<String>,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub country_code: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetilionSoftwareType {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetilionSoftware {
    pub id: u64,

    #[serde(default)]
    pub version_number: Option<String>,

    #[serde(default)]
    pub software_type: Option<NetilionSoftwareType>,
}

impl NetilionSoftware {
    pub fn is_firmware(&self) -> bool {
        self.software_type
            .as_ref()
            .and_then(|t| t.name.as_deref())
            .map(|name| name.to_lowercase().contains("firmware"))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetilionCategory {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub parent: Option<NetilionRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetilionAttachment {
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub download_href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetilionDocument {
    pub id: u64,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub document_number: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub attachments: Vec<NetilionAttachment>,
}

/// One specification entry. Values come back as strings or numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecificationEntry {
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub unit: Option<String>,
}

impl SpecificationEntry {
    /// Value rendered as text; null and empty strings count as absent
    pub fn value_text(&self) -> Option<String> {
        match self.value.as_ref()? {
            Value::Null => None,
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Free-text keyed specification map of an asset
pub type NetilionSpecification = BTreeMap<String, SpecificationEntry>;

/// Netilion list pagination block. `next` is absent on the last page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub page_count: Option<u64>,
    #[serde(default)]
    pub per_page: Option<u64>,
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
}

/// One page of a Netilion collection
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> ListPage<T> {
    pub fn has_next(&self) -> bool {
        self.pagination.next.is_some()
    }
}
