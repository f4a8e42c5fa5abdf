// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Source Agent
//!
//! Reads Netilion through a [`NetilionSource`] and turns the records into AAS
//! shells and submodels. Every collection is drained with
//! [`collect_pages`]; per-asset work inside a batch runs concurrently and is
//! aggregated in input order.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Fetch + map; never talks to the AAS repository

use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::application::mapping::{
    configuration_as_built_submodel, configuration_as_documented_submodel, has_measuring_range,
    nameplate_submodel, shell_for_asset, NameplateSource,
};
use crate::application::pagination::collect_pages;
use crate::domain::aas::{AssetAdministrationShell, Submodel};
use crate::domain::agent_result::BatchOutcome;
use crate::domain::error::MapperError;
use crate::domain::identifiers::SubmodelName;
use crate::domain::netilion::{
    NetilionAsset, NetilionCategory, NetilionDocument, NetilionManufacturer, NetilionProduct,
    NetilionSoftware, NetilionSpecification,
};
use crate::domain::source::{NetilionSource, SourceCredential};

const CONFIGURATION_SUBMODELS: [SubmodelName; 2] = [
    SubmodelName::ConfigurationAsBuilt,
    SubmodelName::ConfigurationAsDocumented,
];

pub struct SourceAgent {
    source: Arc<dyn NetilionSource>,
    server_root: String,
}

impl SourceAgent {
    pub fn new(source: Arc<dyn NetilionSource>, server_root: impl Into<String>) -> Self {
        Self {
            source,
            server_root: server_root.into().trim_end_matches('/').to_string(),
        }
    }

    /// Root of every shell and submodel id this agent produces
    pub fn server_root(&self) -> &str {
        &self.server_root
    }

    pub async fn get_all_assets(&self, auth: &SourceCredential) -> Result<Vec<NetilionAsset>, MapperError> {
        collect_pages("list assets", |page| self.source.list_assets(auth, page))
            .await
            .map_err(|e| e.context("Failed to get all assets from source"))
    }

    pub async fn get_asset(&self, auth: &SourceCredential, asset_id: u64) -> Result<NetilionAsset, MapperError> {
        self.source.get_asset(auth, asset_id).await.map_err(|e| {
            warn!(asset_id, status = e.http_status, "Asset fetch failed: {}", e);
            e.context(format!("Failed to get asset {} from source", asset_id))
        })
    }

    async fn specifications(
        &self,
        auth: &SourceCredential,
        asset_id: u64,
    ) -> Result<NetilionSpecification, MapperError> {
        self.source
            .get_asset_specifications(auth, asset_id)
            .await
            .map_err(|e| {
                warn!(asset_id, status = e.http_status, "Specification fetch failed: {}", e);
                e.context(format!("Failed to get specifications of asset {}", asset_id))
            })
    }

    async fn softwares(&self, auth: &SourceCredential, asset_id: u64) -> Result<Vec<NetilionSoftware>, MapperError> {
        collect_pages(&format!("list softwares of asset {}", asset_id), |page| {
            self.source.list_asset_softwares(auth, asset_id, page)
        })
        .await
    }

    async fn categories(
        &self,
        auth: &SourceCredential,
        product_id: u64,
    ) -> Result<Vec<NetilionCategory>, MapperError> {
        collect_pages(&format!("list categories of product {}", product_id), |page| {
            self.source.list_product_categories(auth, product_id, page)
        })
        .await
    }

    async fn documents(&self, auth: &SourceCredential, asset_id: u64) -> Result<Vec<NetilionDocument>, MapperError> {
        collect_pages(&format!("list documents of asset {}", asset_id), |page| {
            self.source.list_asset_documents(auth, asset_id, page)
        })
        .await
    }

    async fn manufacturer(
        &self,
        auth: &SourceCredential,
        product: Option<&NetilionProduct>,
    ) -> Result<Option<NetilionManufacturer>, MapperError> {
        match product.and_then(|p| p.manufacturer.as_ref()) {
            Some(reference) => self.source.get_manufacturer(auth, reference.id).await.map(Some),
            None => Ok(None),
        }
    }

    async fn product_categories(
        &self,
        auth: &SourceCredential,
        product: Option<&NetilionProduct>,
    ) -> Result<Vec<NetilionCategory>, MapperError> {
        match product {
            Some(product) => self.categories(auth, product.id).await,
            None => Ok(Vec::new()),
        }
    }

    async fn nameplate(&self, auth: &SourceCredential, asset: &NetilionAsset) -> Result<Submodel, MapperError> {
        let product = match &asset.product {
            Some(reference) => Some(self.source.get_product(auth, reference.id).await?),
            None => None,
        };

        let (manufacturer, softwares, categories) = futures::try_join!(
            self.manufacturer(auth, product.as_ref()),
            self.softwares(auth, asset.id),
            self.product_categories(auth, product.as_ref()),
        )?;

        Ok(nameplate_submodel(
            &self.server_root,
            &NameplateSource {
                asset,
                product: product.as_ref(),
                manufacturer: manufacturer.as_ref(),
                softwares: &softwares,
                categories: &categories,
            },
        ))
    }

    /// Fetch whatever `name` needs and map it
    pub async fn build_submodel(
        &self,
        auth: &SourceCredential,
        asset: &NetilionAsset,
        name: SubmodelName,
    ) -> Result<Submodel, MapperError> {
        let result = match name {
            SubmodelName::Nameplate => self.nameplate(auth, asset).await,
            SubmodelName::ConfigurationAsBuilt => {
                let specification = self.specifications(auth, asset.id).await?;
                configuration_as_built_submodel(&self.server_root, asset, &specification)
            }
            SubmodelName::ConfigurationAsDocumented => {
                let specification = self.specifications(auth, asset.id).await?;
                let documents = if has_measuring_range(&specification) {
                    self.documents(auth, asset.id).await?
                } else {
                    Vec::new()
                };
                configuration_as_documented_submodel(&self.server_root, asset, &specification, &documents)
            }
        };

        result.map_err(|e| {
            debug!(asset_id = asset.id, submodel = %name, status = e.http_status, "Submodel build failed");
            e.context(format!("Failed to get {} submodel for asset {} from source", name, asset.id))
        })
    }

    /// Configuration submodels that could be built. A failure only drops that
    /// submodel and is logged.
    async fn attempt_configurations(
        &self,
        auth: &SourceCredential,
        asset: &NetilionAsset,
    ) -> Vec<(SubmodelName, Submodel)> {
        let attempts = CONFIGURATION_SUBMODELS
            .iter()
            .map(|name| async move { (*name, self.build_submodel(auth, asset, *name).await) });

        join_all(attempts)
            .await
            .into_iter()
            .filter_map(|(name, result)| match result {
                Ok(submodel) => Some((name, submodel)),
                Err(e) => {
                    warn!(asset_id = asset.id, submodel = %name, "Omitting submodel reference: {}", e);
                    None
                }
            })
            .collect()
    }

    /// Shell of an asset. Nameplate is always referenced; each configuration
    /// submodel only if it can be built.
    pub async fn asset_to_aas(&self, auth: &SourceCredential, asset: &NetilionAsset) -> AssetAdministrationShell {
        let names: Vec<SubmodelName> = std::iter::once(SubmodelName::Nameplate)
            .chain(self.attempt_configurations(auth, asset).await.into_iter().map(|(name, _)| name))
            .collect();
        shell_for_asset(&self.server_root, asset, &names)
    }

    /// Shell together with every submodel it references. Fails only when the
    /// nameplate cannot be built.
    pub async fn asset_to_aas_with_submodels(
        &self,
        auth: &SourceCredential,
        asset: &NetilionAsset,
    ) -> Result<(AssetAdministrationShell, Vec<Submodel>), MapperError> {
        let (nameplate, configurations) = futures::join!(
            self.build_submodel(auth, asset, SubmodelName::Nameplate),
            self.attempt_configurations(auth, asset),
        );

        let mut names = vec![SubmodelName::Nameplate];
        let mut submodels = vec![nameplate?];
        for (name, submodel) in configurations {
            names.push(name);
            submodels.push(submodel);
        }

        Ok((shell_for_asset(&self.server_root, asset, &names), submodels))
    }

    pub async fn get_aas_for_asset(
        &self,
        auth: &SourceCredential,
        asset_id: u64,
    ) -> Result<AssetAdministrationShell, MapperError> {
        let asset = self.get_asset(auth, asset_id).await?;
        Ok(self.asset_to_aas(auth, &asset).await)
    }

    pub async fn get_aas_for_all_assets(
        &self,
        auth: &SourceCredential,
    ) -> Result<BatchOutcome<AssetAdministrationShell>, MapperError> {
        let assets = self.get_all_assets(auth).await?;
        let shells = join_all(assets.iter().map(|asset| self.asset_to_aas(auth, asset))).await;
        Ok(BatchOutcome::new(shells, Vec::new()))
    }

    /// Submodels expected to be derivable for the asset
    pub async fn asset_submodel_names(
        &self,
        auth: &SourceCredential,
        asset_id: u64,
    ) -> Result<Vec<SubmodelName>, MapperError> {
        let specification = self.specifications(auth, asset_id).await?;
        if has_measuring_range(&specification) {
            Ok(SubmodelName::ALL.to_vec())
        } else {
            Ok(vec![SubmodelName::Nameplate])
        }
    }

    pub async fn get_submodel_for_asset(
        &self,
        auth: &SourceCredential,
        asset_id: u64,
        name: SubmodelName,
    ) -> Result<Submodel, MapperError> {
        let asset = self.get_asset(auth, asset_id).await?;
        self.build_submodel(auth, &asset, name).await
    }

    /// Every expected submodel of one asset, as a batch
    pub async fn get_submodels_for_asset(
        &self,
        auth: &SourceCredential,
        asset_id: u64,
    ) -> Result<BatchOutcome<Submodel>, MapperError> {
        let asset = self.get_asset(auth, asset_id).await?;
        let names = self.asset_submodel_names(auth, asset_id).await?;

        let results = join_all(names.iter().map(|name| self.build_submodel(auth, &asset, *name))).await;
        Ok(BatchOutcome::from_results(
            names.iter().map(|name| name.to_string()).zip(results),
        ))
    }

    /// One submodel per asset. Per-asset failures land in `failed`; only a
    /// failing asset listing fails the call.
    pub async fn get_submodel_for_all_assets(
        &self,
        auth: &SourceCredential,
        name: SubmodelName,
    ) -> Result<BatchOutcome<Submodel>, MapperError> {
        let assets = self.get_all_assets(auth).await?;
        let results = join_all(assets.iter().map(|asset| self.build_submodel(auth, asset, name))).await;

        let outcome = BatchOutcome::from_results(
            assets.iter().map(|asset| asset.id.to_string()).zip(results),
        );
        debug!(
            submodel = %name,
            successful = outcome.successful.len(),
            failed = outcome.failed.len(),
            status = outcome.status,
            "Built submodel for all assets"
        );
        Ok(outcome)
    }
}
