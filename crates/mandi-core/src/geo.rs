//! Great-circle radius filtering and the zoom→radius step table.
//!
//! Inputs are never mutated: retained entities come back wrapped in
//! [`Within`], which carries the computed `distance` alongside the entity.

use serde::Serialize;

use crate::catalog::Shop;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A center point for radius queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Whether this point can serve as a filter center. Exactly (0, 0) is
    /// the "location not provided" sentinel the map widget sends, and
    /// non-finite coordinates computed from bad data are equally unusable.
    #[must_use]
    pub fn is_usable_center(self) -> bool {
        self.lat.is_finite() && self.lng.is_finite() && !(self.lat == 0.0 && self.lng == 0.0)
    }
}

/// Anything locatable enough to take part in radius filtering. Returning
/// `None` excludes the entity with a warning, never an error.
pub trait Locate {
    fn coordinates(&self) -> Option<GeoPoint>;

    /// Label used when logging an excluded entity.
    fn locate_label(&self) -> &str;
}

impl Locate for Shop {
    fn coordinates(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
                Some(GeoPoint { lat, lng })
            }
            _ => None,
        }
    }

    fn locate_label(&self) -> &str {
        &self.name
    }
}

/// An entity retained by the radius filter, annotated with its distance
/// from the center in kilometers. Serializes flat, so the entity's own
/// fields and `distance` sit side by side as the map widget expects.
#[derive(Debug, Clone, Serialize)]
pub struct Within<T> {
    #[serde(flatten)]
    pub entity: T,
    pub distance: f64,
}

/// Haversine great-circle distance between two points, in kilometers.
#[must_use]
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Returns the entities within `radius_km` of `center`, nearest first.
///
/// An unusable center short-circuits to an empty result before any distance
/// is computed. Entities without usable coordinates are skipped with a
/// warning. The sort is stable, so equidistant entities keep input order.
pub fn filter_by_distance<T: Locate + Clone>(
    entities: &[T],
    center: GeoPoint,
    radius_km: f64,
) -> Vec<Within<T>> {
    if !center.is_usable_center() {
        tracing::warn!("radius filter called without a usable center, returning nothing");
        return Vec::new();
    }

    let mut within: Vec<Within<T>> = entities
        .iter()
        .filter_map(|entity| {
            let Some(point) = entity.coordinates() else {
                tracing::warn!(entity = %entity.locate_label(), "skipping entity without coordinates");
                return None;
            };
            let distance = haversine_km(center, point);
            (distance <= radius_km).then(|| Within {
                entity: entity.clone(),
                distance,
            })
        })
        .collect();

    within.sort_by(|x, y| x.distance.total_cmp(&y.distance));
    within
}

/// Display radius for a map zoom level. Three-tier step function the map UI
/// re-evaluates on every pan/zoom; reset-view behavior depends on these
/// exact breakpoints.
#[must_use]
pub fn zoom_to_radius_km(zoom: f64) -> f64 {
    if zoom >= 14.0 {
        3.0
    } else if zoom >= 12.0 {
        8.0
    } else {
        20.0
    }
}

#[cfg(test)]
#[path = "geo_test.rs"]
mod tests;
