// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use super::elements::present;
use crate::domain::aas::{
    AssetAdministrationShell, AssetInformation, AssetKind, Identity, LangString, Reference,
    SpecificAssetId,
};
use crate::domain::identifiers::{
    asset_id_to_shell_id_short, global_asset_id, shell_id, submodel_id, SubmodelName,
};
use crate::domain::netilion::NetilionAsset;

/// Shell of an asset referencing the given submodels, in the given order
pub fn shell_for_asset(
    server_root: &str,
    asset: &NetilionAsset,
    submodels: &[SubmodelName],
) -> AssetAdministrationShell {
    let mut identity = Identity::new(shell_id(server_root, asset.id), asset_id_to_shell_id_short(asset.id));
    if let Some(description) = present(asset.description.as_deref()) {
        identity.description = vec![LangString::en(description)];
    }

    let specific_asset_ids = [
        Some(SpecificAssetId {
            name: "netilionAssetId".to_string(),
            value: asset.id.to_string(),
        }),
        present(asset.serial_number.as_deref()).map(|serial| SpecificAssetId {
            name: "serialNumber".to_string(),
            value: serial.to_string(),
        }),
    ]
    .into_iter()
    .flatten()
    .collect();

    AssetAdministrationShell {
        identity,
        asset_information: AssetInformation {
            asset_kind: AssetKind::Instance,
            global_asset_id: Some(global_asset_id(server_root, asset.id)),
            specific_asset_ids,
        },
        submodels: submodels
            .iter()
            .map(|name| Reference::submodel(submodel_id(server_root, asset.id, *name)))
            .collect(),
        derived_from: None,
    }
}
