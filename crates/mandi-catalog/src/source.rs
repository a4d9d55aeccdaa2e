//! Injected catalog provider abstraction.
//!
//! Matching itself is pure and synchronous; everything I/O-shaped sits
//! behind [`CatalogSource`]. The degrade helpers implement the
//! partial-failure policy: an unreadable source logs a warning and yields an
//! empty snapshot, so one dead backend turns into "everything missing"
//! instead of a failed request.

use std::future::Future;

use mandi_core::{CatalogEntry, Shop, ShopCatalog};

use crate::error::CatalogError;
use crate::file::FileCatalog;

/// Async provider of catalog snapshots. Not object-safe; callers stay
/// generic over the source.
pub trait CatalogSource: Send + Sync {
    /// All shops with their sub-catalogs, in stable scan order.
    fn shop_catalogs(&self)
        -> impl Future<Output = Result<Vec<ShopCatalog>, CatalogError>> + Send;

    /// The flat product list scanned by the stock check.
    fn flat_catalog(&self) -> impl Future<Output = Result<Vec<CatalogEntry>, CatalogError>> + Send;

    /// Shop listing for geo filtering.
    fn shops(&self) -> impl Future<Output = Result<Vec<Shop>, CatalogError>> + Send;
}

impl CatalogSource for FileCatalog {
    fn shop_catalogs(
        &self,
    ) -> impl Future<Output = Result<Vec<ShopCatalog>, CatalogError>> + Send {
        let snapshot = self.shop_catalogs().to_vec();
        async move { Ok(snapshot) }
    }

    fn flat_catalog(&self) -> impl Future<Output = Result<Vec<CatalogEntry>, CatalogError>> + Send {
        let snapshot = self.flat().to_vec();
        async move { Ok(snapshot) }
    }

    fn shops(&self) -> impl Future<Output = Result<Vec<Shop>, CatalogError>> + Send {
        let shops: Vec<Shop> = self
            .shop_catalogs()
            .iter()
            .map(|sc| sc.shop.clone())
            .collect();
        async move { Ok(shops) }
    }
}

/// In-memory source for tests and seeded demos.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    pub shop_catalogs: Vec<ShopCatalog>,
    pub flat: Vec<CatalogEntry>,
}

impl CatalogSource for InMemorySource {
    fn shop_catalogs(
        &self,
    ) -> impl Future<Output = Result<Vec<ShopCatalog>, CatalogError>> + Send {
        let snapshot = self.shop_catalogs.clone();
        async move { Ok(snapshot) }
    }

    fn flat_catalog(&self) -> impl Future<Output = Result<Vec<CatalogEntry>, CatalogError>> + Send {
        let snapshot = self.flat.clone();
        async move { Ok(snapshot) }
    }

    fn shops(&self) -> impl Future<Output = Result<Vec<Shop>, CatalogError>> + Send {
        let shops: Vec<Shop> = self.shop_catalogs.iter().map(|sc| sc.shop.clone()).collect();
        async move { Ok(shops) }
    }
}

/// Shop sub-catalogs, or an empty snapshot if the source is unreadable.
pub async fn shop_catalogs_or_empty<C: CatalogSource>(source: &C) -> Vec<ShopCatalog> {
    match source.shop_catalogs().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!(error = %e, "shop catalogs unreadable, degrading to empty snapshot");
            Vec::new()
        }
    }
}

/// Flat catalog, or an empty snapshot if the source is unreadable.
pub async fn flat_catalog_or_empty<C: CatalogSource>(source: &C) -> Vec<CatalogEntry> {
    match source.flat_catalog().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!(error = %e, "flat catalog unreadable, degrading to empty snapshot");
            Vec::new()
        }
    }
}

/// Shop listing, or an empty snapshot if the source is unreadable.
pub async fn shops_or_empty<C: CatalogSource>(source: &C) -> Vec<Shop> {
    match source.shops().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!(error = %e, "shop listing unreadable, degrading to empty snapshot");
            Vec::new()
        }
    }
}
