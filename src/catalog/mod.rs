//! Plant catalog wiring.
//!
//! This module wraps the JSON catalog under `data/catalog.json` so search and
//! listing code can work from a validated snapshot. Types here mirror the
//! schema fields; callers use `CatalogIndex` for validated loads and id lookup.

pub mod identity;
pub mod index;
pub mod model;

pub use identity::{CategoryKey, ItemId, normalize_category_key};
pub use index::{CATALOG_SCHEMA_VERSION, CatalogIndex};
pub use model::{CatalogFile, CatalogItem};

pub use model::load_catalog_from_path;
