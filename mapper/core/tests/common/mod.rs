// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! In-memory Netilion source and AAS repository shared by the integration tests.

#![allow(dead_code)]

use aas_mapper_core::domain::aas::{AssetAdministrationShell, Submodel};
use aas_mapper_core::domain::error::MapperError;
use aas_mapper_core::domain::netilion::{
    ListPage, NetilionAsset, NetilionCategory, NetilionDocument, NetilionManufacturer,
    NetilionProduct, NetilionRef, NetilionSoftware, NetilionSoftwareType, NetilionSpecification,
    Pagination, SpecificationEntry,
};
use aas_mapper_core::domain::repository::{AasRepository, PagingMetadata, ShellPage};
use aas_mapper_core::domain::source::{NetilionSource, SourceCredential};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};

pub const ROOT: &str = "http://mapper.test";

pub fn credential() -> SourceCredential {
    SourceCredential::new("Bearer user-token")
}

pub fn asset(id: u64) -> NetilionAsset {
    NetilionAsset {
        id,
        serial_number: Some(format!("SN{:05}", id)),
        production_date: Some("2020-01-02T00:00:00Z".to_string()),
        description: None,
        last_seen_at: None,
        status: None,
        product: Some(NetilionRef { id: 100, href: None }),
    }
}

pub fn measuring_range() -> NetilionSpecification {
    let mut spec = NetilionSpecification::new();
    spec.insert(
        "anfangswert_des_messbereiches".to_string(),
        SpecificationEntry { value: Some(json!("0")), unit: Some("bar".to_string()) },
    );
    spec.insert(
        "endwert_des_messbereiches".to_string(),
        SpecificationEntry { value: Some(json!("40")), unit: Some("bar".to_string()) },
    );
    spec
}

fn page<T>(items: Vec<T>, has_next: bool) -> ListPage<T> {
    ListPage {
        items,
        pagination: Pagination {
            next: has_next.then(|| "next".to_string()),
            ..Default::default()
        },
    }
}

#[derive(Default)]
pub struct FakeSource {
    pub assets: Vec<NetilionAsset>,
    pub specifications: BTreeMap<u64, NetilionSpecification>,
    /// Assets whose detail calls answer 503
    pub failing_assets: HashSet<u64>,
    pub page_size: usize,
    pub asset_list_calls: AtomicU32,
}

impl FakeSource {
    pub fn with_assets(ids: &[u64]) -> Self {
        Self {
            assets: ids.iter().map(|id| asset(*id)).collect(),
            page_size: 2,
            ..Default::default()
        }
    }

    pub fn with_measuring_range(mut self, asset_id: u64) -> Self {
        self.specifications.insert(asset_id, measuring_range());
        self
    }

    pub fn failing(mut self, asset_id: u64) -> Self {
        self.failing_assets.insert(asset_id);
        self
    }

    fn check(&self, asset_id: u64) -> Result<(), MapperError> {
        if self.failing_assets.contains(&asset_id) {
            return Err(MapperError::remote(503, Some(json!({"error": "unavailable"})), "HTTP 503"));
        }
        Ok(())
    }
}

#[async_trait]
impl NetilionSource for FakeSource {
    async fn list_assets(&self, _auth: &SourceCredential, page_no: u32) -> Result<ListPage<NetilionAsset>, MapperError> {
        self.asset_list_calls.fetch_add(1, Ordering::SeqCst);
        let size = self.page_size.max(1);
        let start = (page_no as usize - 1) * size;
        let items: Vec<NetilionAsset> = self.assets.iter().skip(start).take(size).cloned().collect();
        Ok(page(items, start + size < self.assets.len()))
    }

    async fn get_asset(&self, _auth: &SourceCredential, asset_id: u64) -> Result<NetilionAsset, MapperError> {
        self.check(asset_id)?;
        self.assets
            .iter()
            .find(|a| a.id == asset_id)
            .cloned()
            .ok_or_else(|| MapperError::remote(404, Some(json!({"errors": ["not found"]})), "HTTP 404"))
    }

    async fn get_product(&self, _auth: &SourceCredential, product_id: u64) -> Result<NetilionProduct, MapperError> {
        Ok(NetilionProduct {
            id: product_id,
            product_code: Some("PMP51".to_string()),
            name: Some("Cerabar".to_string()),
            description: None,
            manufacturer: Some(NetilionRef { id: 200, href: None }),
            href: Some(format!("https://netilion.test/products/{}", product_id)),
        })
    }

    async fn get_manufacturer(
        &self,
        _auth: &SourceCredential,
        manufacturer_id: u64,
    ) -> Result<NetilionManufacturer, MapperError> {
        Ok(NetilionManufacturer {
            id: manufacturer_id,
            name: Some("Endress+Hauser".to_string()),
            street: None,
            street_number: None,
            zip_code: None,
            city: Some("Reinach".to_string()),
            country_code: Some("CH".to_string()),
            phone: None,
            email: None,
        })
    }

    async fn list_asset_softwares(
        &self,
        _auth: &SourceCredential,
        asset_id: u64,
        _page: u32,
    ) -> Result<ListPage<NetilionSoftware>, MapperError> {
        self.check(asset_id)?;
        Ok(page(
            vec![NetilionSoftware {
                id: 1,
                version_number: Some("01.02.03".to_string()),
                software_type: Some(NetilionSoftwareType { id: 1, name: Some("Firmware".to_string()) }),
            }],
            false,
        ))
    }

    async fn list_product_categories(
        &self,
        _auth: &SourceCredential,
        _product_id: u64,
        _page: u32,
    ) -> Result<ListPage<NetilionCategory>, MapperError> {
        Ok(page(Vec::new(), false))
    }

    async fn list_asset_documents(
        &self,
        _auth: &SourceCredential,
        asset_id: u64,
        _page: u32,
    ) -> Result<ListPage<NetilionDocument>, MapperError> {
        self.check(asset_id)?;
        Ok(page(Vec::new(), false))
    }

    async fn get_asset_specifications(
        &self,
        _auth: &SourceCredential,
        asset_id: u64,
    ) -> Result<NetilionSpecification, MapperError> {
        self.check(asset_id)?;
        Ok(self.specifications.get(&asset_id).cloned().unwrap_or_default())
    }
}

/// Repository keeping shells and submodels in maps. Posting an existing id
/// answers 409; ids in `failing_ids` answer 500 on every write.
#[derive(Default)]
pub struct FakeRepository {
    pub shells: Mutex<BTreeMap<String, AssetAdministrationShell>>,
    pub submodels: Mutex<BTreeMap<(String, String), Submodel>>,
    pub failing_ids: Mutex<HashSet<String>>,
    pub posts: AtomicU32,
    pub updates: AtomicU32,
    pub deletes: AtomicU32,
    pub calls: AtomicU32,
}

impl FakeRepository {
    pub fn fail_on(&self, id: impl Into<String>) {
        self.failing_ids.lock().insert(id.into());
    }

    pub fn insert_shell(&self, shell: AssetAdministrationShell) {
        self.shells.lock().insert(shell.id().to_string(), shell);
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    fn write_check(&self, id: &str) -> Result<(), MapperError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_ids.lock().contains(id) {
            return Err(MapperError::remote(500, Some(json!({"messages": ["boom"]})), "HTTP 500"));
        }
        Ok(())
    }

    fn not_found(id: &str) -> MapperError {
        MapperError::remote(404, Some(json!({"messages": [format!("{} not found", id)]})), "HTTP 404")
    }
}

#[async_trait]
impl AasRepository for FakeRepository {
    async fn post_shell(&self, shell: &AssetAdministrationShell) -> Result<u16, MapperError> {
        self.write_check(shell.id())?;
        self.posts.fetch_add(1, Ordering::SeqCst);
        let mut shells = self.shells.lock();
        if shells.contains_key(shell.id()) {
            return Err(MapperError::remote(409, Some(json!({"messages": ["exists"]})), "HTTP 409"));
        }
        shells.insert(shell.id().to_string(), shell.clone());
        Ok(201)
    }

    async fn update_shell(&self, shell: &AssetAdministrationShell) -> Result<u16, MapperError> {
        self.write_check(shell.id())?;
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.shells.lock().insert(shell.id().to_string(), shell.clone());
        Ok(204)
    }

    async fn get_all_shells(&self, cursor: Option<String>) -> Result<ShellPage, MapperError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let start: usize = cursor.as_deref().and_then(|c| c.parse().ok()).unwrap_or(0);
        let shells = self.shells.lock();
        let result: Vec<AssetAdministrationShell> = shells.values().skip(start).take(2).cloned().collect();
        let next = (start + 2 < shells.len()).then(|| (start + 2).to_string());
        Ok(ShellPage {
            result,
            paging_metadata: PagingMetadata { cursor: next },
        })
    }

    async fn get_shell(&self, shell_id: &str) -> Result<AssetAdministrationShell, MapperError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.shells.lock().get(shell_id).cloned().ok_or_else(|| Self::not_found(shell_id))
    }

    async fn delete_shell(&self, shell_id: &str) -> Result<u16, MapperError> {
        self.write_check(shell_id)?;
        self.deletes.fetch_add(1, Ordering::SeqCst);
        match self.shells.lock().remove(shell_id) {
            Some(_) => Ok(204),
            None => Err(Self::not_found(shell_id)),
        }
    }

    async fn post_submodel(&self, shell_id: &str, submodel: &Submodel) -> Result<u16, MapperError> {
        self.write_check(submodel.id())?;
        self.posts.fetch_add(1, Ordering::SeqCst);
        let key = (shell_id.to_string(), submodel.id().to_string());
        let mut submodels = self.submodels.lock();
        if submodels.contains_key(&key) {
            return Err(MapperError::remote(409, None, "HTTP 409"));
        }
        submodels.insert(key, submodel.clone());
        Ok(201)
    }

    async fn update_submodel(&self, shell_id: &str, submodel: &Submodel) -> Result<u16, MapperError> {
        self.write_check(submodel.id())?;
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.submodels
            .lock()
            .insert((shell_id.to_string(), submodel.id().to_string()), submodel.clone());
        Ok(204)
    }

    async fn get_submodel(&self, shell_id: &str, submodel_id: &str) -> Result<Submodel, MapperError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.submodels
            .lock()
            .get(&(shell_id.to_string(), submodel_id.to_string()))
            .cloned()
            .ok_or_else(|| Self::not_found(submodel_id))
    }

    async fn delete_submodel(&self, shell_id: &str, submodel_id: &str) -> Result<u16, MapperError> {
        self.write_check(submodel_id)?;
        self.deletes.fetch_add(1, Ordering::SeqCst);
        match self
            .submodels
            .lock()
            .remove(&(shell_id.to_string(), submodel_id.to_string()))
        {
            Some(_) => Ok(204),
            None => Err(Self::not_found(submodel_id)),
        }
    }
}
