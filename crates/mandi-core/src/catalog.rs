use serde::{Deserialize, Serialize};

/// A purchasable item as seen by the matching algorithms, normalized at the
/// source boundary from whatever loose record shape the catalog stores.
///
/// Multiple entries may share a `name` across different shops; the matcher
/// treats each entry as independent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Opaque identifier, unique within its source collection.
    pub id: String,
    /// Free-text product name. Primary matching field; stored as-is, both
    /// sides are normalized identically at match time.
    pub name: String,
    /// Non-negative price. Malformed source values are coerced to 0 at the
    /// boundary rather than failing the whole catalog.
    pub price: f64,
    /// Optional display image URL.
    pub image: Option<String>,
    /// Provenance shop, absent for entries of a flat/global catalog.
    pub shop_id: Option<String>,
    pub shop_name: Option<String>,
}

/// A shop as listed by the catalog source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shop {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    /// Coordinates are optional: shops without a usable location are
    /// excluded from geo filtering with a warning, never an error.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// One shop together with its sub-catalog, the unit scanned by the
/// per-shop matching strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopCatalog {
    pub shop: Shop,
    pub entries: Vec<CatalogEntry>,
}

impl ShopCatalog {
    /// Returns the total number of entries in this shop's sub-catalog.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}
