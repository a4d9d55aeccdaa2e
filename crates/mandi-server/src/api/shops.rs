use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use mandi_catalog::{shops_or_empty, CatalogSource};
use mandi_core::{filter_by_distance, zoom_to_radius_km, GeoPoint, Shop, Within};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct NearbyQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    /// Explicit radius wins over zoom when both are given.
    pub radius_km: Option<f64>,
    pub zoom: Option<f64>,
}

/// Shops within a radius of the caller, nearest first, each annotated with
/// `distance` in kilometers.
///
/// A missing, half-missing, or (0, 0) center yields an empty list rather
/// than an error: the map widget fires before geolocation resolves and
/// expects nothing back, not a failure.
pub(super) async fn nearby<C: CatalogSource>(
    State(state): State<AppState<C>>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<ApiResponse<Vec<Within<Shop>>>>, ApiError> {
    let radius_km = match (query.radius_km, query.zoom) {
        (Some(r), _) if r > 0.0 => r,
        (Some(_), _) => {
            return Err(ApiError::new(
                req_id.0,
                "validation_error",
                "radius_km must be positive",
            ))
        }
        (None, Some(zoom)) => zoom_to_radius_km(zoom),
        (None, None) => zoom_to_radius_km(f64::from(DEFAULT_ZOOM)),
    };

    // A lone coordinate is as "not provided" as none at all.
    let center = match (query.lat, query.lng) {
        (Some(lat), Some(lng)) => GeoPoint { lat, lng },
        _ => GeoPoint { lat: 0.0, lng: 0.0 },
    };

    let shops = shops_or_empty(state.catalog.as_ref()).await;
    let data = filter_by_distance(&shops, center, radius_km);

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Zoom assumed when the widget supplies neither radius nor zoom; maps to
/// the middle 8 km tier.
const DEFAULT_ZOOM: u8 = 13;
