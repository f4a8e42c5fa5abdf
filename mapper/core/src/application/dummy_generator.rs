// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Dummy shells for exercising a repository without Netilion access.
//!
//! Everything is rooted on `{base}/dummy`, where `base` must be a loopback URL
//! so that [`RepositoryAgent::flush`](crate::application::repository_agent::RepositoryAgent::flush)
//! can remove it again.

use regex::Regex;

use crate::application::mapping::{nameplate_submodel, shell_for_asset, NameplateSource};
use crate::application::repository_agent::LOOPBACK_ID_PATTERN;
use crate::domain::aas::{AssetAdministrationShell, Submodel};
use crate::domain::error::MapperError;
use crate::domain::identifiers::SubmodelName;
use crate::domain::netilion::NetilionAsset;

/// Asset ids of dummies start here to stay clear of real Netilion ids in logs
pub const DUMMY_ASSET_ID_OFFSET: u64 = 900_000;

pub const MAX_DUMMIES: usize = 1000;

pub fn generate(count: usize, base_url: &str) -> Result<Vec<(AssetAdministrationShell, Vec<Submodel>)>, MapperError> {
    if count == 0 || count > MAX_DUMMIES {
        return Err(MapperError::invalid_input(format!(
            "Dummy count must be between 1 and {}, got {}",
            MAX_DUMMIES, count
        )));
    }

    let root = format!("{}/dummy", base_url.trim_end_matches('/'));
    let pattern = Regex::new(LOOPBACK_ID_PATTERN)
        .map_err(|e| MapperError::configuration(format!("Invalid loopback pattern: {}", e)))?;
    if !pattern.is_match(&format!("{}/", root)) {
        return Err(MapperError::invalid_input(format!(
            "Dummy base URL must be a loopback URL, got {}",
            base_url
        )));
    }

    Ok((1..=count as u64)
        .map(|n| {
            let asset = NetilionAsset {
                id: DUMMY_ASSET_ID_OFFSET + n,
                serial_number: Some(format!("DUMMY-{:04}", n)),
                production_date: None,
                description: Some(format!("Dummy asset {}", n)),
                last_seen_at: None,
                status: None,
                product: None,
            };
            let nameplate = nameplate_submodel(
                &root,
                &NameplateSource {
                    asset: &asset,
                    product: None,
                    manufacturer: None,
                    softwares: &[],
                    categories: &[],
                },
            );
            (shell_for_asset(&root, &asset, &[SubmodelName::Nameplate]), vec![nameplate])
        })
        .collect())
}
