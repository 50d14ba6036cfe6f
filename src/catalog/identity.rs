use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a catalog item.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical category tag attached to items (e.g. `INDOOR`, `SMALL`).
///
/// The raw spelling is preserved exactly as received so label resolution can
/// fall back to it. Comparisons between keys go through
/// [`normalize_category_key`]; `"indoor"` and `"INDOOR"` are the same category.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryKey(String);

/// Canonical form used for every category lookup.
///
/// All table inserts and lookups go through here so callers never sprinkle
/// their own case conversions.
pub fn normalize_category_key(raw: &str) -> String {
    raw.to_uppercase()
}

impl CategoryKey {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The key as supplied by the caller or the catalog file.
    pub fn raw(&self) -> &str {
        &self.0
    }

    pub fn normalized(&self) -> String {
        normalize_category_key(&self.0)
    }

    /// True when both keys name the same category, ignoring case.
    pub fn matches(&self, other: &CategoryKey) -> bool {
        self.normalized() == other.normalized()
    }
}

impl PartialEq for CategoryKey {
    fn eq(&self, other: &Self) -> bool {
        self.matches(other)
    }
}

impl Eq for CategoryKey {}

impl AsRef<str> for CategoryKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CategoryKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
