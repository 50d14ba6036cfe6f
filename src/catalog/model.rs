//! Deserializable representation of `data/catalog.json`.
//!
//! The types mirror `schema/catalog.schema.json` so loaders and tests can work
//! with typed items instead of ad-hoc JSON. Use `CatalogIndex` for validation
//! and id lookup; use these structs directly when no validation is needed.

use crate::catalog::identity::{CategoryKey, ItemId};
use anyhow::{Context, Result};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Deserialize, Serialize)]
/// Full catalog file as stored on disk.
pub struct CatalogFile {
    pub schema_version: String,
    pub items: Vec<CatalogItem>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
/// Purchasable product record shown in listings.
///
/// Items are read-only snapshots; search and listing code only borrows them.
pub struct CatalogItem {
    pub id: ItemId,
    pub display_name: String,
    #[serde(with = "decimal")]
    pub price: BigDecimal,
    #[serde(default, with = "decimal")]
    pub discount_percent: BigDecimal,
    #[serde(default)]
    pub stock_quantity: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<CategoryKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl CatalogItem {
    /// True when the item is tagged with `key`, ignoring case.
    pub fn has_category(&self, key: &CategoryKey) -> bool {
        self.categories.iter().any(|candidate| candidate.matches(key))
    }

    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }
}

/// Read and parse a catalog file from disk without additional validation.
pub fn load_catalog_from_path(path: &Path) -> Result<CatalogFile> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let catalog: CatalogFile = serde_json::from_str(&data)
        .with_context(|| format!("parsing catalog {}", path.display()))?;
    Ok(catalog)
}

/// Prices and discounts accept JSON numbers or decimal strings and are written
/// back as strings so no precision is lost on the way out.
mod decimal {
    use bigdecimal::BigDecimal;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;
    use std::str::FromStr;

    pub fn serialize<S>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let rendered = match &value {
            Value::Number(number) => number.to_string(),
            Value::String(text) => text.trim().to_string(),
            other => {
                return Err(D::Error::custom(format!(
                    "expected a number or decimal string, got {other}"
                )));
            }
        };
        BigDecimal::from_str(&rendered)
            .map_err(|err| D::Error::custom(format!("invalid decimal '{rendered}': {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn item_parses_camel_case_fields() {
        let item: CatalogItem = serde_json::from_value(json!({
            "id": 1,
            "displayName": "Cây Monstera",
            "price": 300000,
            "discountPercent": 10,
            "stockQuantity": 5,
            "categories": ["LARGE", "indoor"],
            "imageUrl": "https://example.com/monstera.jpg"
        }))
        .unwrap();
        assert_eq!(item.id, ItemId(1));
        assert_eq!(item.display_name, "Cây Monstera");
        assert_eq!(item.price, BigDecimal::from(300000));
        assert_eq!(item.discount_percent, BigDecimal::from(10));
        assert!(item.in_stock());
        assert!(item.has_category(&CategoryKey::from("INDOOR")));
        assert!(!item.has_category(&CategoryKey::from("OUTDOOR")));
    }

    #[test]
    fn optional_fields_default() {
        let item: CatalogItem = serde_json::from_value(json!({
            "id": 7,
            "displayName": "Basil",
            "price": "9.99"
        }))
        .unwrap();
        assert_eq!(item.discount_percent, BigDecimal::from(0));
        assert_eq!(item.stock_quantity, 0);
        assert!(item.categories.is_empty());
        assert!(!item.in_stock());
    }

    #[test]
    fn fractional_prices_keep_their_digits() {
        let item: CatalogItem = serde_json::from_value(json!({
            "id": 2,
            "displayName": "Snake Plant",
            "price": 24.99
        }))
        .unwrap();
        assert_eq!(item.price, BigDecimal::from_str("24.99").unwrap());

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value.get("price").and_then(|v| v.as_str()), Some("24.99"));
        assert!(value.get("categories").is_none());
    }

    #[test]
    fn non_numeric_price_is_rejected() {
        let err = serde_json::from_value::<CatalogItem>(json!({
            "id": 3,
            "displayName": "Aloe Vera",
            "price": true
        }))
        .expect_err("boolean price should fail");
        assert!(err.to_string().contains("decimal string"));
    }

    #[test]
    fn fractional_discounts_are_accepted() {
        let item: CatalogItem = serde_json::from_value(json!({
            "id": 4,
            "displayName": "Snake Plant",
            "price": 24.99,
            "discountPercent": 12.5
        }))
        .unwrap();
        assert_eq!(item.discount_percent, BigDecimal::from_str("12.5").unwrap());

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["discountPercent"], "12.5");
    }
}
