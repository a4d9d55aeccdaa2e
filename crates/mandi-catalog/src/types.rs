//! Raw catalog record shapes as they arrive from the document store or the
//! YAML catalog file.
//!
//! These are deliberately loose: `price` may be a number or a string,
//! optional fields may be empty strings, and unknown fields are dropped by
//! serde at this boundary instead of being threaded through the matchers.

use serde::Deserialize;

/// A raw product record. Only the fields the matching core cares about are
/// kept; everything else in the source document is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProduct {
    pub id: String,
    pub name: String,
    /// Number or string in the wild; coerced to a non-negative f64 during
    /// normalization, defaulting to 0.
    #[serde(default)]
    pub price: Option<serde_json::Value>,
    #[serde(default)]
    pub image: Option<String>,
}

/// A raw shop record with its inline sub-catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct RawShop {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub products: Vec<RawProduct>,
}

/// Top-level shape of the catalog file: per-shop sub-catalogs plus an
/// optional flat list of global products with no shop provenance.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogFile {
    pub shops: Vec<RawShop>,
    #[serde(default)]
    pub products: Vec<RawProduct>,
}
