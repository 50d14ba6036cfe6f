//! Category translation tables.
//!
//! A `TranslationTable` is built once (from the built-in labels or a JSON file
//! under `data/`) and never mutated afterwards. Keys are stored in their
//! normalized form so lookups only normalize the incoming key.

use crate::catalog::normalize_category_key;
use crate::i18n::Language;
use crate::schema_loader::validate_file_against_schema;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

pub const TRANSLATIONS_SCHEMA_VERSION: &str = "category_translations_v1";

const BUILTIN_LABELS: &[(&str, [&str; 3])] = &[
    // key           en              vi              ko
    ("SMALL", ["Small", "Nhỏ", "소형"]),
    ("MEDIUM", ["Medium", "Vừa", "중형"]),
    ("LARGE", ["Large", "Lớn", "대형"]),
    ("INDOOR", ["Indoor", "Trong nhà", "실내용"]),
    ("OUTDOOR", ["Outdoor", "Ngoài trời", "야외용"]),
    ("DECORATION", ["Decoration", "Trang trí", "장식용"]),
    ("EDIBLE", ["Edible", "Ăn được", "식용"]),
    ("MEDICINAL", ["Medicinal", "Dược liệu", "약용"]),
    ("LIVING_ROOM", ["Living Room", "Phòng khách", "거실용"]),
    ("OFFICE", ["Office", "Văn phòng", "사무실용"]),
    ("GARDEN", ["Garden", "Khu vườn", "정원용"]),
    ("BALCONY", ["Balcony", "Ban công", "발코니용"]),
];

#[derive(Clone, Debug, Default, PartialEq)]
/// Immutable `(language, category key) -> label` lookup.
pub struct TranslationTable {
    labels: BTreeMap<Language, BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize)]
struct TranslationFile {
    schema_version: String,
    languages: BTreeMap<String, BTreeMap<String, String>>,
}

impl TranslationTable {
    /// Labels shipped with the app for every supported language.
    pub fn builtin() -> Self {
        let mut builder = TranslationTable::builder();
        for (key, labels) in BUILTIN_LABELS {
            for (language, label) in Language::ALL.iter().zip(labels.iter()) {
                builder = builder.label(*language, key, *label);
            }
        }
        builder.build()
    }

    pub fn builder() -> TranslationTableBuilder {
        TranslationTableBuilder::default()
    }

    /// Load a table from a JSON file validated against the translations schema.
    pub fn load(path: &Path) -> Result<Self> {
        let schema_path = resolve_translations_schema_path(path);
        let value = validate_file_against_schema(path, &schema_path)?;
        let file: TranslationFile = serde_json::from_value(value)
            .with_context(|| format!("decoding translations {}", path.display()))?;
        if file.schema_version != TRANSLATIONS_SCHEMA_VERSION {
            bail!(
                "schema_version '{}' not supported, expected '{}'",
                file.schema_version,
                TRANSLATIONS_SCHEMA_VERSION
            );
        }

        let mut builder = TranslationTable::builder();
        for (code, entries) in file.languages {
            let language: Language = code
                .parse()
                .with_context(|| format!("translations {}", path.display()))?;
            for (key, label) in entries {
                if key.trim().is_empty() {
                    bail!("{} has an empty key for language {language}", path.display());
                }
                if label.trim().is_empty() {
                    bail!("{} has an empty label for {language}/{key}", path.display());
                }
                builder = builder.label(language, &key, label);
            }
        }
        let table = builder.build();
        info!(
            path = %path.display(),
            languages = table.labels.len(),
            "loaded translation table"
        );
        Ok(table)
    }

    /// Translated label for `key`, if the table has one.
    pub fn label(&self, key: &str, language: Language) -> Option<&str> {
        self.labels
            .get(&language)?
            .get(&normalize_category_key(key))
            .map(String::as_str)
    }

    /// Languages with at least one label.
    pub fn languages(&self) -> impl Iterator<Item = Language> + '_ {
        self.labels.keys().copied()
    }

    /// Normalized keys translated for `language`, in sorted order.
    pub fn keys(&self, language: Language) -> impl Iterator<Item = &str> {
        self.labels
            .get(&language)
            .into_iter()
            .flat_map(|entries| entries.keys().map(String::as_str))
    }
}

#[derive(Debug, Default)]
/// Assembles a `TranslationTable`; later labels for the same key win.
pub struct TranslationTableBuilder {
    labels: BTreeMap<Language, BTreeMap<String, String>>,
}

impl TranslationTableBuilder {
    pub fn label(mut self, language: Language, key: &str, label: impl Into<String>) -> Self {
        self.labels
            .entry(language)
            .or_default()
            .insert(normalize_category_key(key), label.into());
        self
    }

    pub fn build(self) -> TranslationTable {
        TranslationTable {
            labels: self.labels,
        }
    }
}

fn resolve_translations_schema_path(path: &Path) -> PathBuf {
    if let Some(base) = path.parent().and_then(|p| p.parent()) {
        let candidate = base.join("schema/translations.schema.json");
        if candidate.exists() {
            return candidate;
        }
    }

    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("schema/translations.schema.json")
}
