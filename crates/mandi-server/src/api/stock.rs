use axum::{extract::State, Extension, Json};
use serde::Deserialize;

use mandi_catalog::{flat_catalog_or_empty, CatalogSource};
use mandi_core::{match_stock, StockResult};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct StockCheckRequest {
    pub ingredients: Vec<String>,
}

/// Quick stock pre-check of an ingredient list against the flat catalog.
pub(super) async fn check<C: CatalogSource>(
    State(state): State<AppState<C>>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<StockCheckRequest>,
) -> Result<Json<ApiResponse<StockResult>>, ApiError> {
    if body.ingredients.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "ingredients must be non-empty",
        ));
    }

    let catalog = flat_catalog_or_empty(state.catalog.as_ref()).await;
    let result = match_stock(&body.ingredients, &catalog);

    Ok(Json(ApiResponse {
        data: result,
        meta: ResponseMeta::new(req_id.0),
    }))
}
