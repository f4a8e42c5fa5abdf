// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Identifier Codecs
//!
//! Bit-exact identifier formats shared with the AAS repository:
//!
//! | Object | Format |
//! |--------|--------|
//! | Shell id | `{serverRoot}/mapper/shells/{assetId}` |
//! | Submodel id | `{serverRoot}/mapper/shells/{assetId}/submodels/{slug}` |
//! | Shell idShort | `NetilionAAS_{assetId}` |
//!
//! plus the base64url path-segment encoding the repository requires.

use base64::engine::general_purpose::{STANDARD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::MapperError;

pub const SHELL_ID_SHORT_PREFIX: &str = "NetilionAAS_";

/// Submodels the mapper knows how to derive from a Netilion asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubmodelName {
    Nameplate,
    ConfigurationAsBuilt,
    ConfigurationAsDocumented,
}

impl SubmodelName {
    pub const ALL: [SubmodelName; 3] = [
        SubmodelName::Nameplate,
        SubmodelName::ConfigurationAsBuilt,
        SubmodelName::ConfigurationAsDocumented,
    ];

    /// idShort of the submodel
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmodelName::Nameplate => "Nameplate",
            SubmodelName::ConfigurationAsBuilt => "ConfigurationAsBuilt",
            SubmodelName::ConfigurationAsDocumented => "ConfigurationAsDocumented",
        }
    }

    /// Last path segment of the submodel id
    pub fn slug(&self) -> &'static str {
        match self {
            SubmodelName::Nameplate => "nameplate",
            SubmodelName::ConfigurationAsBuilt => "configuration_as_built",
            SubmodelName::ConfigurationAsDocumented => "configuration_as_documented",
        }
    }
}

impl fmt::Display for SubmodelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmodelName {
    type Err = MapperError;

    /// Accepts the idShort (`ConfigurationAsBuilt`) or the slug (`configuration_as_built`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SubmodelName::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(s) || name.slug() == s)
            .ok_or_else(|| MapperError::invalid_input(format!("Unknown submodel name: {}", s)))
    }
}

fn root(server_root: &str) -> &str {
    server_root.trim_end_matches('/')
}

pub fn shell_id(server_root: &str, asset_id: u64) -> String {
    format!("{}/mapper/shells/{}", root(server_root), asset_id)
}

pub fn submodel_id(server_root: &str, asset_id: u64, name: SubmodelName) -> String {
    format!("{}/submodels/{}", shell_id(server_root, asset_id), name.slug())
}

pub fn global_asset_id(server_root: &str, asset_id: u64) -> String {
    format!("{}/mapper/assets/{}", root(server_root), asset_id)
}

/// Only the canonical decimal form is accepted: no sign, no leading zeros
fn parse_asset_id(raw: &str, original: &str) -> Result<u64, MapperError> {
    raw.parse::<u64>()
        .ok()
        .filter(|id| id.to_string() == raw)
        .ok_or_else(|| MapperError::invalid_input(format!("No Netilion asset id in '{}'", original)))
}

pub fn shell_id_to_asset_id(server_root: &str, shell_id: &str) -> Result<u64, MapperError> {
    let prefix = format!("{}/mapper/shells/", root(server_root));
    let rest = shell_id
        .strip_prefix(&prefix)
        .ok_or_else(|| MapperError::invalid_input(format!("Not a mapper shell id: {}", shell_id)))?;
    parse_asset_id(rest, shell_id)
}

pub fn submodel_id_to_asset_id(
    server_root: &str,
    submodel_id: &str,
) -> Result<(u64, SubmodelName), MapperError> {
    let prefix = format!("{}/mapper/shells/", root(server_root));
    let rest = submodel_id
        .strip_prefix(&prefix)
        .ok_or_else(|| MapperError::invalid_input(format!("Not a mapper submodel id: {}", submodel_id)))?;
    let (asset, slug) = rest
        .split_once("/submodels/")
        .ok_or_else(|| MapperError::invalid_input(format!("Not a mapper submodel id: {}", submodel_id)))?;
    Ok((parse_asset_id(asset, submodel_id)?, slug.parse()?))
}

pub fn asset_id_to_shell_id_short(asset_id: u64) -> String {
    format!("{}{}", SHELL_ID_SHORT_PREFIX, asset_id)
}

pub fn shell_id_short_to_asset_id(id_short: &str) -> Result<u64, MapperError> {
    let rest = id_short.strip_prefix(SHELL_ID_SHORT_PREFIX).ok_or_else(|| {
        MapperError::invalid_input(format!("Not a Netilion shell idShort: {}", id_short))
    })?;
    parse_asset_id(rest, id_short)
}

/// Encode an id for use as a repository path segment
pub fn encode_id(id: &str) -> String {
    URL_SAFE_NO_PAD.encode(id.as_bytes())
}

/// Decode a path segment id. Padded and standard alphabets are accepted too.
pub fn decode_id(encoded: &str) -> Result<String, MapperError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(encoded)
        .or_else(|_| URL_SAFE.decode(encoded))
        .or_else(|_| STANDARD.decode(encoded))
        .map_err(|e| MapperError::invalid_input(format!("Invalid base64 id '{}': {}", encoded, e)))?;
    String::from_utf8(bytes)
        .map_err(|e| MapperError::invalid_input(format!("Invalid UTF-8 in id '{}': {}", encoded, e)))
}

/// Best-effort decode for log messages
pub fn decode_for_log(encoded: &str) -> String {
    decode_id(encoded).unwrap_or_else(|_| encoded.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = "https://mapper.example.com/";

    #[test]
    fn test_identifier_formats() {
        assert_eq!(shell_id(ROOT, 17), "https://mapper.example.com/mapper/shells/17");
        assert_eq!(
            submodel_id(ROOT, 17, SubmodelName::ConfigurationAsBuilt),
            "https://mapper.example.com/mapper/shells/17/submodels/configuration_as_built"
        );
        assert_eq!(asset_id_to_shell_id_short(17), "NetilionAAS_17");
    }

    #[test]
    fn test_id_short_round_trip() {
        for id in [0_u64, 1, 42, 987_654_321, u64::MAX] {
            assert_eq!(shell_id_short_to_asset_id(&asset_id_to_shell_id_short(id)).unwrap(), id);
        }
    }

    #[test]
    fn test_shell_and_submodel_id_round_trip() {
        assert_eq!(shell_id_to_asset_id(ROOT, &shell_id(ROOT, 9)).unwrap(), 9);

        for name in SubmodelName::ALL {
            let id = submodel_id(ROOT, 31, name);
            assert_eq!(submodel_id_to_asset_id(ROOT, &id).unwrap(), (31, name));
        }
    }

    #[test]
    fn test_foreign_ids_are_rejected() {
        assert!(shell_id_short_to_asset_id("SomeOtherShell_3").is_err());
        assert!(shell_id_short_to_asset_id("NetilionAAS_abc").is_err());
        assert!(shell_id_short_to_asset_id("NetilionAAS_+5").is_err());
        assert!(shell_id_short_to_asset_id("NetilionAAS_007").is_err());
        assert!(shell_id_to_asset_id(ROOT, "https://mapper.example.com/mapper/shells/09").is_err());
        assert!(shell_id_to_asset_id(ROOT, "http://other/mapper/shells/3").is_err());
        assert_eq!(
            submodel_id_to_asset_id(ROOT, "https://mapper.example.com/mapper/shells/3/submodels/unknown")
                .unwrap_err()
                .http_status,
            400
        );
    }

    #[test]
    fn test_submodel_name_parsing() {
        assert_eq!("Nameplate".parse::<SubmodelName>().unwrap(), SubmodelName::Nameplate);
        assert_eq!(
            "configuration_as_documented".parse::<SubmodelName>().unwrap(),
            SubmodelName::ConfigurationAsDocumented
        );
        assert!("TechnicalData".parse::<SubmodelName>().is_err());
    }

    #[test]
    fn test_base64_path_encoding() {
        let id = "https://mapper.example.com/mapper/shells/17";
        let encoded = encode_id(id);
        assert!(!encoded.contains('/'));
        assert!(!encoded.contains('='));
        assert_eq!(decode_id(&encoded).unwrap(), id);
        assert_eq!(decode_for_log("not base64!"), "not base64!");
    }
}
