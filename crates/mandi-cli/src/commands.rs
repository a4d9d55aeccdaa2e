//! Command handlers for the CLI.
//!
//! Each handler renders its result to a string so `main` only prints;
//! catalog-fetch failures degrade to empty snapshots rather than aborting,
//! matching the server's behavior.

use std::fmt::Write as _;

use mandi_catalog::{
    flat_catalog_or_empty, shop_catalogs_or_empty, shops_or_empty, CatalogSource,
};
use mandi_core::{filter_by_distance, match_ingredients, match_stock, zoom_to_radius_km, GeoPoint};
use mandi_recipes::{GeneratedRecipe, RecipeClient, RetryPolicy};

/// Generate a recipe for `query` and match its ingredients against the shop
/// catalogs.
///
/// # Errors
///
/// Returns an error only if recipe generation fails; catalog problems
/// degrade to "everything unavailable".
pub(crate) async fn run_suggest<C: CatalogSource>(
    source: &C,
    client: &RecipeClient,
    retry: RetryPolicy,
    query: &str,
) -> anyhow::Result<String> {
    let recipe = client.generate_with_retry(query, retry).await?;
    let shops = shop_catalogs_or_empty(source).await;
    let outcome = match_ingredients(&recipe.ingredients, &shops);

    let mut out = render_recipe(&recipe);
    let _ = writeln!(out, "\navailable:");
    for item in &outcome.available {
        let _ = writeln!(
            out,
            "  {} -> {} ({}, Rs {:.2})",
            item.ingredient, item.product.name, item.shop_name, item.product.price
        );
    }
    let _ = writeln!(out, "alternatives:");
    for item in &outcome.alternatives {
        let _ = writeln!(
            out,
            "  {} ~> {} ({}, similarity {:.2})",
            item.ingredient, item.alternative.name, item.shop_name, item.similarity
        );
    }
    let _ = writeln!(out, "unavailable: {}", outcome.unavailable.join(", "));
    Ok(out)
}

/// Stock-check `ingredients` against the flat catalog.
pub(crate) async fn run_stock<C: CatalogSource>(source: &C, ingredients: &[String]) -> String {
    let catalog = flat_catalog_or_empty(source).await;
    let result = match_stock(ingredients, &catalog);

    let mut out = String::new();
    let _ = writeln!(out, "in stock:");
    for item in &result.in_stock {
        let shop = if item.shop_name.is_empty() {
            "global catalog"
        } else {
            item.shop_name.as_str()
        };
        let _ = writeln!(out, "  {} ({shop}, Rs {:.2})", item.name, item.price);
    }
    let _ = writeln!(out, "missing: {}", result.missing.join(", "));
    out
}

/// List shops within radius of a point, nearest first.
pub(crate) async fn run_nearby<C: CatalogSource>(
    source: &C,
    lat: f64,
    lng: f64,
    zoom: Option<f64>,
    radius_km: Option<f64>,
) -> String {
    let radius = radius_km.unwrap_or_else(|| zoom_to_radius_km(zoom.unwrap_or(13.0)));
    let shops = shops_or_empty(source).await;
    let nearby = filter_by_distance(&shops, GeoPoint { lat, lng }, radius);

    if nearby.is_empty() {
        return format!("no shops within {radius} km\n");
    }

    let mut out = String::new();
    for item in &nearby {
        let _ = writeln!(out, "{:>6.2} km  {}", item.distance, item.entity.name);
    }
    out
}

fn render_recipe(recipe: &GeneratedRecipe) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", recipe.title);
    let _ = writeln!(out, "{}", recipe.description);
    let _ = writeln!(out, "ingredients: {}", recipe.ingredients.join(", "));
    out
}
