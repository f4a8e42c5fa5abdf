// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Domain Mapper
//!
//! Pure transformations from pre-fetched Netilion records to AAS value
//! objects. Nothing in here performs I/O.

pub mod elements;
pub mod semantics;
pub mod nameplate;
pub mod configuration;
pub mod shell;

pub use configuration::{
    configuration_as_built_submodel, configuration_as_documented_submodel, has_measuring_range,
};
pub use nameplate::{nameplate_submodel, NameplateSource};
pub use shell::shell_for_asset;
