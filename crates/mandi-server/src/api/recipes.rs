use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use mandi_catalog::{shop_catalogs_or_empty, CatalogSource};
use mandi_core::matcher::{match_ingredients, AlternativeItem, AvailableItem};
use mandi_recipes::GeneratedRecipe;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct SuggestRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub(super) struct SuggestData {
    recipe: GeneratedRecipe,
    available: Vec<AvailableItem>,
    alternatives: Vec<AlternativeItem>,
    unavailable: Vec<String>,
}

/// Generates a recipe for the query, then matches its ingredients against
/// the shop catalogs.
///
/// Generation failure is the caller's problem (502); an unreadable catalog
/// is not — matching degrades to everything-unavailable so the chat widget
/// still gets a usable response.
pub(super) async fn suggest<C: CatalogSource>(
    State(state): State<AppState<C>>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<SuggestRequest>,
) -> Result<Json<ApiResponse<SuggestData>>, ApiError> {
    let query = body.query.trim();
    if query.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "query must be non-empty",
        ));
    }

    let recipe = state
        .recipes
        .generate_with_retry(query, state.retry)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "recipe generation failed");
            ApiError::new(
                req_id.0.clone(),
                "upstream_error",
                "recipe generation service unavailable",
            )
        })?;

    let shops = shop_catalogs_or_empty(state.catalog.as_ref()).await;
    let outcome = match_ingredients(&recipe.ingredients, &shops);

    Ok(Json(ApiResponse {
        data: SuggestData {
            recipe,
            available: outcome.available,
            alternatives: outcome.alternatives,
            unavailable: outcome.unavailable,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
