//! Indexed view of a catalog file.
//!
//! The index enforces the catalog schema and provides lookup by item id. It is
//! strict about duplicates and out-of-range values so listings never render a
//! half-valid catalog.

use crate::catalog::{CatalogFile, CatalogItem, ItemId};
use crate::schema_loader::validate_file_against_schema;
use anyhow::{Context, Result, bail};
use bigdecimal::BigDecimal;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

pub const CATALOG_SCHEMA_VERSION: &str = "plant_catalog_v1";

#[derive(Debug)]
/// Catalog items plus a derived index keyed by item id.
pub struct CatalogIndex {
    items: Vec<CatalogItem>,
    by_id: BTreeMap<ItemId, usize>,
}

impl CatalogIndex {
    /// Load and validate the catalog from disk.
    ///
    /// Validates against the schema next to the catalog (or the crate copy),
    /// then checks the invariants the schema cannot express.
    pub fn load(path: &Path) -> Result<Self> {
        let schema_path = resolve_catalog_schema_path(path);
        let value = validate_file_against_schema(path, &schema_path)?;
        let catalog: CatalogFile = serde_json::from_value(value)
            .with_context(|| format!("decoding catalog {}", path.display()))?;
        let index = Self::from_catalog(catalog)?;
        info!(
            path = %path.display(),
            items = index.len(),
            "loaded catalog"
        );
        Ok(index)
    }

    /// Build an index from an already parsed catalog file.
    pub fn from_catalog(catalog: CatalogFile) -> Result<Self> {
        if catalog.schema_version != CATALOG_SCHEMA_VERSION {
            bail!(
                "schema_version '{}' not supported, expected '{}'",
                catalog.schema_version,
                CATALOG_SCHEMA_VERSION
            );
        }
        Self::from_items(catalog.items)
    }

    /// Build an index from loose items (stdin or fixtures).
    pub fn from_items(items: Vec<CatalogItem>) -> Result<Self> {
        let by_id = build_index(&items)?;
        Ok(Self { items, by_id })
    }

    /// Resolve an item by id.
    pub fn item(&self, id: ItemId) -> Option<&CatalogItem> {
        self.by_id.get(&id).map(|&pos| &self.items[pos])
    }

    /// Iterates item ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.by_id.keys().copied()
    }

    /// Items in catalog file order.
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn build_index(items: &[CatalogItem]) -> Result<BTreeMap<ItemId, usize>> {
    let mut map = BTreeMap::new();
    for (pos, item) in items.iter().enumerate() {
        if item.display_name.trim().is_empty() {
            bail!("item {} has an empty displayName", item.id);
        }
        let discount_range = BigDecimal::from(0)..=BigDecimal::from(100);
        if !discount_range.contains(&item.discount_percent) {
            bail!(
                "item {} has discountPercent {} outside 0..=100",
                item.id,
                item.discount_percent
            );
        }
        if item.price < BigDecimal::from(0) {
            bail!("item {} has a negative price {}", item.id, item.price);
        }
        if item
            .categories
            .iter()
            .any(|key| key.raw().trim().is_empty())
        {
            bail!("item {} has an empty category key", item.id);
        }
        if map.insert(item.id, pos).is_some() {
            bail!("duplicate item id {}", item.id);
        }
    }
    Ok(map)
}

fn resolve_catalog_schema_path(catalog_path: &Path) -> PathBuf {
    if let Some(base) = catalog_path.parent().and_then(|p| p.parent()) {
        let candidate = base.join("schema/catalog.schema.json");
        if candidate.exists() {
            return candidate;
        }
    }

    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("schema/catalog.schema.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use tempfile::NamedTempFile;

    fn write_catalog(value: &Value) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        serde_json::to_writer(&mut file, value).unwrap();
        file
    }

    fn item(id: u64, name: &str) -> Value {
        json!({"id": id, "displayName": name, "price": 10000, "discountPercent": 0, "stockQuantity": 1})
    }

    #[test]
    fn load_indexes_items_by_id() {
        let file = write_catalog(&json!({
            "schema_version": CATALOG_SCHEMA_VERSION,
            "items": [item(2, "Cây Xương Rồng"), item(1, "Cây Monstera")]
        }));
        let index = CatalogIndex::load(file.path()).expect("catalog loads");
        assert_eq!(index.len(), 2);
        assert_eq!(index.ids().collect::<Vec<_>>(), vec![ItemId(1), ItemId(2)]);
        assert_eq!(
            index.item(ItemId(2)).map(|i| i.display_name.as_str()),
            Some("Cây Xương Rồng")
        );
        assert_eq!(index.items()[0].id, ItemId(2), "file order is preserved");
        assert!(index.item(ItemId(99)).is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let file = write_catalog(&json!({
            "schema_version": CATALOG_SCHEMA_VERSION,
            "items": [item(1, "Monstera"), item(1, "Cactus")]
        }));
        let err = CatalogIndex::load(file.path()).expect_err("duplicates should fail");
        assert!(err.to_string().contains("duplicate item id 1"));
    }

    #[test]
    fn out_of_range_discount_is_rejected() {
        let mut bad = item(5, "Lavender");
        bad["discountPercent"] = json!(120);
        let file = write_catalog(&json!({
            "schema_version": CATALOG_SCHEMA_VERSION,
            "items": [bad]
        }));
        assert!(CatalogIndex::load(file.path()).is_err());
    }

    #[test]
    fn fractional_discount_loads() {
        let mut sale = item(6, "Lavender");
        sale["discountPercent"] = json!(12.5);
        let file = write_catalog(&json!({
            "schema_version": CATALOG_SCHEMA_VERSION,
            "items": [sale]
        }));
        let index = CatalogIndex::load(file.path()).expect("fractional discount is valid");
        assert_eq!(
            index.item(ItemId(6)).map(|i| i.discount_percent.to_string()),
            Some("12.5".to_string())
        );
    }

    #[test]
    fn loose_items_with_discount_over_100_are_rejected() {
        let mut bad = item(7, "Fern");
        bad["discountPercent"] = json!("100.5");
        let items: Vec<CatalogItem> = vec![serde_json::from_value(bad).unwrap()];
        let err = CatalogIndex::from_items(items).expect_err("discount above 100");
        assert!(err.to_string().contains("discountPercent 100.5"));
    }

    #[test]
    fn unknown_schema_version_is_rejected() {
        let catalog = CatalogFile {
            schema_version: "plant_catalog_v0".to_string(),
            items: Vec::new(),
        };
        let err = CatalogIndex::from_catalog(catalog).expect_err("version should fail");
        assert!(err.to_string().contains("plant_catalog_v0"));
    }

    #[test]
    fn empty_display_name_is_rejected_for_loose_items() {
        let items: Vec<CatalogItem> = vec![serde_json::from_value(item(3, "  ")).unwrap()];
        assert!(CatalogIndex::from_items(items).is_err());
    }
}
