// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Pagination
//!
//! Two ways of draining a paged collaborator into one list:
//!
//! - [`collect_pages`]: page-number pagination (Netilion). Page `n + 1` is
//!   requested only once page `n` reported a next page.
//! - [`collect_cursor_pages`]: opaque cursor pagination (AAS repository). The
//!   cursor of each response is passed into the next request until none is
//!   returned.
//!
//! Both are strictly sequential and all-or-nothing: a failing page aborts the
//! drain and the pages collected so far are dropped.

use std::future::Future;
use tracing::{debug, error};

use crate::domain::error::MapperError;
use crate::domain::netilion::ListPage;
use crate::domain::repository::ShellPage;
use crate::domain::aas::AssetAdministrationShell;

/// Drain a page-number paginated endpoint, starting at page 1
pub async fn collect_pages<T, F, Fut>(operation: &str, mut fetch_page: F) -> Result<Vec<T>, MapperError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<ListPage<T>, MapperError>>,
{
    let mut items = Vec::new();
    let mut page = 1_u32;

    loop {
        let response = fetch_page(page).await.map_err(|e| {
            error!(operation, page, status = e.http_status, "Page fetch failed: {}", e);
            e.context(format!("Failed to {} (page {})", operation, page))
        })?;

        let has_next = response.has_next();
        debug!(operation, page, count = response.items.len(), has_next, "Fetched page");
        items.extend(response.items);

        if !has_next {
            return Ok(items);
        }
        page += 1;
    }
}

/// Drain the cursor-paginated shell listing of the repository
pub async fn collect_cursor_pages<F, Fut>(
    operation: &str,
    mut fetch_page: F,
) -> Result<Vec<AssetAdministrationShell>, MapperError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<ShellPage, MapperError>>,
{
    let mut shells = Vec::new();
    let mut cursor: Option<String> = None;
    let mut page = 1_u32;

    loop {
        let response = fetch_page(cursor.clone()).await.map_err(|e| {
            error!(operation, page, ?cursor, status = e.http_status, "Cursor page fetch failed: {}", e);
            e.context(format!("Failed to {} (page {})", operation, page))
        })?;

        debug!(operation, page, count = response.result.len(), "Fetched cursor page");
        shells.extend(response.result);

        match response.paging_metadata.cursor {
            Some(next) if !next.is_empty() => {
                cursor = Some(next);
                page += 1;
            }
            _ => return Ok(shells),
        }
    }
}
