//! Client-side catalog search.
//!
//! Filters borrow the caller's items and return matches in their original
//! order; the source slice is never touched. An empty query matches
//! everything.

use crate::catalog::{CatalogItem, CategoryKey};
use tracing::debug;

/// Items whose display name contains `query`, ignoring case.
///
/// Lowercasing is Unicode-aware so Vietnamese names match their lowercase
/// spelling ("Cây" matches "cây").
pub fn filter_by_name<'a>(query: &str, items: &'a [CatalogItem]) -> Vec<&'a CatalogItem> {
    if query.is_empty() {
        return items.iter().collect();
    }

    let needle = query.to_lowercase();
    let matches: Vec<&CatalogItem> = items
        .iter()
        .filter(|item| item.display_name.to_lowercase().contains(&needle))
        .collect();
    debug!(query, matched = matches.len(), total = items.len(), "name filter");
    matches
}

/// Items tagged with `key`, ignoring case.
pub fn filter_by_category<'a>(key: &CategoryKey, items: &'a [CatalogItem]) -> Vec<&'a CatalogItem> {
    let matches: Vec<&CatalogItem> = items.iter().filter(|item| item.has_category(key)).collect();
    debug!(category = key.raw(), matched = matches.len(), "category filter");
    matches
}

#[derive(Clone, Debug, Default)]
/// Text plus category tags, as picked on the search screen.
///
/// Every listed category must be present on an item for it to match.
pub struct SearchQuery {
    pub text: String,
    pub categories: Vec<CategoryKey>,
}

impl SearchQuery {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            categories: Vec::new(),
        }
    }

    pub fn with_category(mut self, key: impl Into<CategoryKey>) -> Self {
        self.categories.push(key.into());
        self
    }

    /// Name filter first, then each category filter in turn.
    pub fn apply<'a>(&self, items: &'a [CatalogItem]) -> Vec<&'a CatalogItem> {
        let mut matches = filter_by_name(&self.text, items);
        for key in &self.categories {
            matches.retain(|item| item.has_category(key));
        }
        matches
    }
}
