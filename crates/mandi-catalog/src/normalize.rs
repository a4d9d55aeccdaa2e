//! Normalization from raw catalog records to [`mandi_core::CatalogEntry`].
//!
//! All leniency lives here: malformed prices coerce to 0 with a warning,
//! empty strings become absent fields, and provenance is attached when the
//! record comes from a shop sub-catalog.

use mandi_core::{CatalogEntry, Shop, ShopCatalog};

use crate::types::{RawProduct, RawShop};

/// Coerces a loose price value to a non-negative f64, defaulting to 0.
///
/// Accepts JSON numbers and numeric strings; anything else (including
/// negative values) is 0 — one bad record must not fail the whole catalog.
fn coerce_price(raw: Option<&serde_json::Value>, product_id: &str) -> f64 {
    let parsed = match raw {
        None => Some(0.0),
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match parsed {
        Some(p) if p >= 0.0 && p.is_finite() => p,
        _ => {
            tracing::warn!(product_id, "unusable price on catalog record, defaulting to 0");
            0.0
        }
    }
}

/// Normalizes one raw product, attaching shop provenance when present.
#[must_use]
pub fn normalize_entry(product: &RawProduct, shop: Option<&Shop>) -> CatalogEntry {
    let image = product.image.clone().filter(|s| !s.is_empty());

    CatalogEntry {
        id: product.id.clone(),
        name: product.name.clone(),
        price: coerce_price(product.price.as_ref(), &product.id),
        image,
        shop_id: shop.map(|s| s.id.clone()),
        shop_name: shop.map(|s| s.name.clone()),
    }
}

/// Normalizes a raw shop record into a [`ShopCatalog`].
#[must_use]
pub fn normalize_shop(raw: &RawShop) -> ShopCatalog {
    let shop = Shop {
        id: raw.id.clone(),
        name: raw.name.clone(),
        address: raw.address.clone().filter(|s| !s.is_empty()),
        latitude: raw.latitude,
        longitude: raw.longitude,
    };

    let entries = raw
        .products
        .iter()
        .map(|p| normalize_entry(p, Some(&shop)))
        .collect();

    ShopCatalog { shop, entries }
}
