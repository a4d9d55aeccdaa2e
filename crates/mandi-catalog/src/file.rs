//! YAML-backed catalog loading and validation.
//!
//! The catalog file mirrors what the storefront's document store holds:
//! shops with inline sub-catalogs plus an optional flat products list. It is
//! read once at startup; matching always runs against the in-memory
//! snapshot.

use std::collections::HashSet;
use std::path::Path;

use mandi_core::{CatalogEntry, ShopCatalog};

use crate::error::CatalogError;
use crate::normalize::{normalize_entry, normalize_shop};
use crate::types::CatalogFile;

/// A catalog loaded from a YAML file, normalized and validated.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    shop_catalogs: Vec<ShopCatalog>,
    flat: Vec<CatalogEntry>,
}

impl FileCatalog {
    /// Loads and validates the catalog at `path`.
    ///
    /// The flat catalog is assembled as the top-level products followed by
    /// every shop sub-catalog flattened in shop order, so flat scans see a
    /// stable order across runs.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read, parsed, or fails
    /// validation.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::FileIo {
            path: path.display().to_string(),
            source: e,
        })?;

        let file: CatalogFile = serde_yaml::from_str(&content)?;
        validate_catalog(&file)?;

        let shop_catalogs: Vec<ShopCatalog> = file.shops.iter().map(normalize_shop).collect();

        let mut flat: Vec<CatalogEntry> =
            file.products.iter().map(|p| normalize_entry(p, None)).collect();
        for shop_catalog in &shop_catalogs {
            flat.extend(shop_catalog.entries.iter().cloned());
        }

        tracing::info!(
            shops = shop_catalogs.len(),
            flat_entries = flat.len(),
            path = %path.display(),
            "catalog loaded"
        );

        Ok(Self {
            shop_catalogs,
            flat,
        })
    }

    #[must_use]
    pub fn shop_catalogs(&self) -> &[ShopCatalog] {
        &self.shop_catalogs
    }

    #[must_use]
    pub fn flat(&self) -> &[CatalogEntry] {
        &self.flat
    }
}

fn validate_catalog(file: &CatalogFile) -> Result<(), CatalogError> {
    let mut seen_shop_ids = HashSet::new();

    for shop in &file.shops {
        if shop.name.trim().is_empty() {
            return Err(CatalogError::Validation(format!(
                "shop '{}' has an empty name",
                shop.id
            )));
        }

        if !seen_shop_ids.insert(shop.id.as_str()) {
            return Err(CatalogError::Validation(format!(
                "duplicate shop id: '{}'",
                shop.id
            )));
        }

        let mut seen_product_ids = HashSet::new();
        for product in &shop.products {
            if product.name.trim().is_empty() {
                return Err(CatalogError::Validation(format!(
                    "product '{}' in shop '{}' has an empty name",
                    product.id, shop.id
                )));
            }
            if !seen_product_ids.insert(product.id.as_str()) {
                return Err(CatalogError::Validation(format!(
                    "duplicate product id '{}' in shop '{}'",
                    product.id, shop.id
                )));
            }
        }
    }

    let mut seen_flat_ids = HashSet::new();
    for product in &file.products {
        if product.name.trim().is_empty() {
            return Err(CatalogError::Validation(format!(
                "flat product '{}' has an empty name",
                product.id
            )));
        }
        if !seen_flat_ids.insert(product.id.as_str()) {
            return Err(CatalogError::Validation(format!(
                "duplicate flat product id: '{}'",
                product.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "file_test.rs"]
mod tests;
