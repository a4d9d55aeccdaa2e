pub mod error;
pub mod file;
pub mod normalize;
pub mod source;
pub mod types;

pub use error::CatalogError;
pub use file::FileCatalog;
pub use normalize::{normalize_entry, normalize_shop};
pub use source::{
    flat_catalog_or_empty, shop_catalogs_or_empty, shops_or_empty, CatalogSource, InMemorySource,
};
pub use types::{CatalogFile, RawProduct, RawShop};
