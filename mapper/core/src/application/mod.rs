// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod pagination;
pub mod mapping;
pub mod source_agent;
pub mod repository_agent;
pub mod sync_service;
pub mod dummy_generator;
