//! Shared library for the plantstore catalog tools.
//!
//! The crate exposes the catalog types, the text and category filters, the
//! localized category labels, and the listing rows the shop screens render.
//! Public functions here also cover what the binaries need around that core:
//! repository discovery, default data paths, and parsing catalog items from
//! stdin.

use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod catalog;
pub mod config;
pub mod i18n;
pub mod listing;
mod schema_loader;
pub mod search;
pub mod telemetry;

pub use catalog::{
    CATALOG_SCHEMA_VERSION, CatalogFile, CatalogIndex, CatalogItem, CategoryKey, ItemId,
    load_catalog_from_path, normalize_category_key,
};
pub use config::AppConfig;
pub use i18n::{LabelResolver, Language, TranslationTable, resolve_label};
pub use listing::{Listing, ListingRenderer, StockStatus, discounted_price, format_amount};
pub use search::{SearchQuery, filter_by_category, filter_by_name};

const ROOT_SENTINEL: &str = "schema/catalog.schema.json";
const MANIFEST: &str = "Cargo.toml";
const DEFAULT_CATALOG: &str = "data/catalog.json";

/// Returns true when `candidate` looks like the repository root.
fn is_repo_root(candidate: &Path) -> bool {
    candidate.join(ROOT_SENTINEL).is_file() && candidate.join(MANIFEST).is_file()
}

/// Verifies that an explicit `PLANTSTORE_ROOT` hint points at a valid repo.
fn repo_root_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !hint_path.exists() || !is_repo_root(&hint_path) {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_repo_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the repository root.
///
/// Honors `PLANTSTORE_ROOT` if it points at a real repo, falls back to
/// climbing up from the current executable, then uses the build-time hint.
pub fn find_repo_root() -> Result<PathBuf> {
    if let Ok(env_root) = env::var("PLANTSTORE_ROOT") {
        if let Some(root) = repo_root_from_hint(&env_root) {
            return Ok(root);
        }
    }

    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            if let Some(root) = search_upwards(exe_dir) {
                return Ok(root);
            }
        }
    }

    if let Some(hint) = option_env!("PLANTSTORE_ROOT_HINT") {
        if let Some(root) = repo_root_from_hint(hint) {
            return Ok(root);
        }
    }

    bail!("Unable to locate plantstore repository root. Set PLANTSTORE_ROOT to the cloned repository.");
}

/// Catalog shipped with the repository.
pub fn default_catalog_path(repo_root: &Path) -> PathBuf {
    repo_root.join(DEFAULT_CATALOG)
}

/// Split comma- or whitespace-delimited configuration lists into tokens.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse catalog items from stdin-style input.
///
/// Accepts a full catalog file object, a JSON array of items, a single item
/// object, or NDJSON with one item per line. Empty input is an error.
pub fn parse_catalog_stream(input: &str) -> Result<Vec<CatalogItem>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        bail!("No input provided on stdin");
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return match value {
            Value::Array(items) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<Vec<_>, _>>()
                .context("Unable to parse JSON array of catalog items"),
            Value::Object(map) if map.contains_key("items") => {
                serde_json::from_value::<CatalogFile>(Value::Object(map))
                    .map(|catalog| catalog.items)
                    .context("Unable to parse catalog file")
            }
            Value::Object(_) => serde_json::from_value(value)
                .map(|item| vec![item])
                .context("Unable to parse catalog item"),
            _ => bail!("Unsupported JSON input; expected object or array"),
        };
    }

    let mut items = Vec::new();
    for (idx, line) in trimmed.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let item: CatalogItem = serde_json::from_str(line)
            .with_context(|| format!("Unable to parse catalog item from line {}", idx + 1))?;
        items.push(item);
    }

    if items.is_empty() {
        bail!("No catalog items found in input stream");
    }

    Ok(items)
}
