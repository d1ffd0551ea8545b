pub mod app_config;
pub mod capitals;
pub mod config;
pub mod error;
pub mod export;
pub mod industries;
pub mod place;
pub mod resolve;

pub use app_config::{AppConfig, Environment};
pub use capitals::{find_capital, Capital, CAPITALS};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use export::{places_to_csv_bytes, read_places_csv, write_places_csv, ExportError};
pub use industries::{load_industries, IndustriesFile};
pub use place::{GeoPoint, Place};
pub use resolve::resolve_clicked_place;
