//! Exact-priority per-shop ingredient matching with ranked alternatives.
//!
//! For each requested ingredient the full shop list is scanned in order.
//! A containment hit (either direction, case-insensitive) classifies the
//! ingredient as available; otherwise the similarity-ranked candidates
//! collected during the same scan become its alternatives, and an ingredient
//! with neither lands in `unavailable`. Pure and synchronous — callers fetch
//! the catalog snapshot first.

use serde::Serialize;

use crate::catalog::{CatalogEntry, ShopCatalog};
use crate::normalize::normalize;
use crate::similarity::similarity;

/// Minimum similarity for a non-exact product to count as an alternative.
/// Empirical; kept literal for behavioral parity with observed results.
pub const SIMILARITY_THRESHOLD: f64 = 0.4;

/// Alternatives kept per ingredient, best-first.
pub const MAX_ALTERNATIVES_PER_INGREDIENT: usize = 2;

/// Cap on the assembled `available` list, applied after all ingredients.
pub const MAX_AVAILABLE: usize = 10;

/// Cap on the assembled `alternatives` list, applied after all ingredients.
pub const MAX_ALTERNATIVES: usize = 6;

/// An ingredient resolved to an exact (containment) catalog hit.
#[derive(Debug, Clone, Serialize)]
pub struct AvailableItem {
    pub ingredient: String,
    pub product: CatalogEntry,
    pub shop_id: String,
    pub shop_name: String,
}

/// A fuzzy candidate offered for an ingredient with no exact hit.
#[derive(Debug, Clone, Serialize)]
pub struct AlternativeItem {
    pub ingredient: String,
    pub alternative: CatalogEntry,
    pub shop_id: String,
    pub shop_name: String,
    pub similarity: f64,
}

/// Outcome of matching one ingredient list against a shop-organized catalog.
///
/// Every input ingredient is represented exactly once: as an `available`
/// entry, as the owner of one or more `alternatives` entries, or as an
/// `unavailable` name (before the global caps truncate the first two lists).
#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchResult {
    pub available: Vec<AvailableItem>,
    pub alternatives: Vec<AlternativeItem>,
    pub unavailable: Vec<String>,
}

/// Containment in either direction; equality is the degenerate case of both.
fn is_exact_match(product_name: &str, ingredient: &str) -> bool {
    product_name.contains(ingredient) || ingredient.contains(product_name)
}

/// Matches `ingredients` against shop sub-catalogs, in the order given.
///
/// Shops and their entries are scanned in the order supplied, so identical
/// inputs always produce identical output — the first shop scanned that
/// stocks an exact hit wins `available` for that ingredient. Products that
/// are not exact hits are scored with [`similarity`] during the same pass;
/// scores above [`SIMILARITY_THRESHOLD`] compete for the ingredient's
/// alternative slots.
#[must_use]
pub fn match_ingredients(ingredients: &[String], shops: &[ShopCatalog]) -> MatchResult {
    let mut result = MatchResult::default();

    for ingredient in ingredients {
        let needle = normalize(ingredient);
        if needle.is_empty() {
            // Blank names would contain-match every product; treat them as
            // unavailable, same as the flat stock scan does.
            result.unavailable.push(ingredient.clone());
            continue;
        }
        let mut exact: Option<AvailableItem> = None;
        let mut candidates: Vec<AlternativeItem> = Vec::new();

        for shop_catalog in shops {
            for entry in &shop_catalog.entries {
                let product_name = normalize(&entry.name);

                if is_exact_match(&product_name, &needle) {
                    if exact.is_none() {
                        exact = Some(AvailableItem {
                            ingredient: ingredient.clone(),
                            product: entry.clone(),
                            shop_id: shop_catalog.shop.id.clone(),
                            shop_name: shop_catalog.shop.name.clone(),
                        });
                    }
                    continue;
                }

                let score = similarity(&product_name, &needle);
                if score > SIMILARITY_THRESHOLD {
                    candidates.push(AlternativeItem {
                        ingredient: ingredient.clone(),
                        alternative: entry.clone(),
                        shop_id: shop_catalog.shop.id.clone(),
                        shop_name: shop_catalog.shop.name.clone(),
                        similarity: score,
                    });
                }
            }
        }

        if let Some(item) = exact {
            result.available.push(item);
        } else if candidates.is_empty() {
            result.unavailable.push(ingredient.clone());
        } else {
            // Stable sort: equal scores keep shop-scan order.
            candidates.sort_by(|x, y| y.similarity.total_cmp(&x.similarity));
            candidates.truncate(MAX_ALTERNATIVES_PER_INGREDIENT);
            result.alternatives.extend(candidates);
        }
    }

    result.available.truncate(MAX_AVAILABLE);
    result.alternatives.truncate(MAX_ALTERNATIVES);
    result
}

#[cfg(test)]
#[path = "matcher_test.rs"]
mod tests;
