pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use self::config::{CliConfig, Command};

pub use self::config::{cli::LocalStorage, toml_config::CatalogConfig};
pub use self::core::{
    catalog::CatalogStore,
    display::{card_image_url, format_card_no, rarity_stars, DisplayOptions},
    report::OutputFormat,
    search::QueryEngine,
};
pub use self::domain::identifier::normalize_card_no;
pub use self::domain::model::{Card, Cylinder, CylinderRow, SearchMatch};
pub use self::utils::error::{CatalogError, Result};
