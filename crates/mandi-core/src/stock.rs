//! Flat-catalog stock check with token-overlap fallback.
//!
//! The bulk pre-check counterpart to [`crate::matcher`]: one winner or
//! nothing per ingredient, no ranked alternatives. At flat-catalog scale
//! token overlap is an adequate and much cheaper fuzzy signal than edit
//! distance, so the two strategies stay deliberately separate.

use serde::Serialize;

use crate::catalog::CatalogEntry;
use crate::normalize::{normalize_loose, shared_token_count};

/// Distinct tokens two names must share for the fallback to accept a match.
pub const MIN_SHARED_TOKENS: usize = 2;

/// A winning product projected to the fixed stock-check shape. Absent
/// source fields default to empty string (price to 0) rather than being
/// omitted.
#[derive(Debug, Clone, Serialize)]
pub struct StockItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub image: String,
    pub shop_id: String,
    pub shop_name: String,
}

impl From<&CatalogEntry> for StockItem {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            id: entry.id.clone(),
            name: entry.name.clone(),
            price: entry.price,
            image: entry.image.clone().unwrap_or_default(),
            shop_id: entry.shop_id.clone().unwrap_or_default(),
            shop_name: entry.shop_name.clone().unwrap_or_default(),
        }
    }
}

/// Outcome of a stock check: each input ingredient contributes either its
/// winning product to `in_stock` or its raw name to `missing`, never both.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StockResult {
    pub in_stock: Vec<StockItem>,
    pub missing: Vec<String>,
}

/// Scans the flat catalog once per ingredient, in the order given.
///
/// A containment hit (either direction, on loosely-normalized names) wins
/// immediately and stops the scan for that ingredient. Failing containment,
/// the first product sharing at least [`MIN_SHARED_TOKENS`] long tokens is
/// held as a fallback winner, displaced only by a containment hit found
/// later in the same scan.
#[must_use]
pub fn match_stock(ingredients: &[String], catalog: &[CatalogEntry]) -> StockResult {
    let mut result = StockResult::default();

    for ingredient in ingredients {
        let needle = normalize_loose(ingredient);
        let mut best: Option<&CatalogEntry> = None;

        if !needle.is_empty() {
            for entry in catalog {
                let product_name = normalize_loose(&entry.name);
                if product_name.is_empty() {
                    continue;
                }

                if product_name.contains(&needle) || needle.contains(&product_name) {
                    best = Some(entry);
                    break;
                }

                if best.is_none() && shared_token_count(&product_name, &needle) >= MIN_SHARED_TOKENS
                {
                    best = Some(entry);
                }
            }
        }

        match best {
            Some(entry) => result.in_stock.push(StockItem::from(entry)),
            None => result.missing.push(ingredient.clone()),
        }
    }

    result
}

#[cfg(test)]
#[path = "stock_test.rs"]
mod tests;
