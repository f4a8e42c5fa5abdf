// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Domain
//!
//! Value objects, collaborator contracts and the error taxonomy of the mapper.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** No I/O; everything here is shared by the outer layers

pub mod aas;
pub mod netilion;
pub mod identifiers;
pub mod agent_result;
pub mod error;
pub mod source;
pub mod repository;
pub mod auth;
pub mod mapper_config;
