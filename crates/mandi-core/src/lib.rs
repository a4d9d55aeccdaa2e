pub mod app_config;
pub mod catalog;
pub mod config;
pub mod error;
pub mod geo;
pub mod matcher;
pub mod normalize;
pub mod similarity;
pub mod stock;

pub use app_config::{AppConfig, Environment};
pub use catalog::{CatalogEntry, Shop, ShopCatalog};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use geo::{filter_by_distance, haversine_km, zoom_to_radius_km, GeoPoint, Locate, Within};
pub use matcher::{match_ingredients, MatchResult};
pub use similarity::similarity;
pub use stock::{match_stock, StockResult};
