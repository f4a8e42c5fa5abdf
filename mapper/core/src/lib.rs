// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Netilion to AAS Mapper
//!
//! Pulls asset records from Netilion, maps them to Asset Administration Shell
//! documents and pushes those into an AAS repository.
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Purpose:** `domain` value objects and contracts, `application` agents,
//!   `infrastructure` HTTP adapters, `presentation` HTTP surface

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
