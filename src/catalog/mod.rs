//! # Topic Catalog
//!
//! The static set of topics the directory is built from, plus the icon
//! registry the renderer resolves `Topic::icon` through.
//!
//! The catalog is loaded once at startup and never re-fetched.

pub mod icons;
pub mod types;

pub use icons::IconRegistry;
pub use types::{Catalog, CatalogError, Topic};

use log::{info, warn};
use std::fs;
use std::path::Path;

/// The catalog compiled into the binary.
const BUNDLED_CATALOG: &str = include_str!("../../data/topics-list.json");

/// Loads the bundled catalog.
pub fn bundled() -> Result<Catalog, CatalogError> {
    Catalog::from_json(BUNDLED_CATALOG)
}

/// Loads a catalog from a JSON file on disk.
pub fn load(path: &Path) -> Result<Catalog, CatalogError> {
    let contents = fs::read_to_string(path).map_err(CatalogError::Io)?;
    let catalog = Catalog::from_json(&contents)?;
    info!(
        "Loaded catalog \"{}\" from {} ({} topics)",
        catalog.title(),
        path.display(),
        catalog.len()
    );
    Ok(catalog)
}

/// Loads from `path` when given, the bundled catalog otherwise.
pub fn load_or_bundled(path: Option<&Path>) -> Result<Catalog, CatalogError> {
    match path {
        Some(p) => load(p),
        None => {
            let catalog = bundled()?;
            info!("Using bundled catalog ({} topics)", catalog.len());
            Ok(catalog)
        }
    }
}

/// Warns about an empty catalog or configured categories no topic uses.
///
/// Returns `true` when nothing looks misconfigured.
pub fn check(catalog: &Catalog, category_order: &[String]) -> bool {
    let mut healthy = true;
    if catalog.is_empty() {
        warn!("Catalog has no topics");
        healthy = false;
    }
    if category_order.is_empty() {
        warn!("No categories configured; every topic lands in the trailing group");
        healthy = false;
    }
    let unused = catalog.unused_categories(category_order);
    if !unused.is_empty() {
        warn!("Configured categories with no topics: {:?}", unused);
        healthy = false;
    }
    healthy
}
