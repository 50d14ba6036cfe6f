//! Environment-driven configuration shared by the binaries.
//!
//! Every setting has a default; missing variables are logged at `info` and
//! unusable values are errors rather than silent fallbacks. CLI flags are
//! applied on top of the loaded values by each binary.

use crate::i18n::{LabelResolver, Language, TranslationTable};
use crate::listing::{DEFAULT_CURRENCY, ListingRenderer};
use crate::{default_catalog_path, find_repo_root};
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

pub const ENV_CATALOG: &str = "PLANTSTORE_CATALOG";
pub const ENV_TRANSLATIONS: &str = "PLANTSTORE_TRANSLATIONS";
pub const ENV_LANG: &str = "PLANTSTORE_LANG";
pub const ENV_CURRENCY: &str = "PLANTSTORE_CURRENCY";

const DEFAULT_LANGUAGE: Language = Language::Vi;

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// `None` selects `data/catalog.json` under the repository root.
    pub catalog_path: Option<PathBuf>,
    /// `None` selects the built-in table.
    pub translations_path: Option<PathBuf>,
    pub language: Language,
    pub currency: String,
}

impl AppConfig {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through `lookup` so tests can supply their own variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let catalog_path = var(ENV_CATALOG).map(PathBuf::from);

        let translations_path = var(ENV_TRANSLATIONS).map(PathBuf::from);
        if translations_path.is_none() {
            info!("{ENV_TRANSLATIONS} not set, using built-in labels");
        }

        let language = match var(ENV_LANG) {
            Some(raw) => raw
                .parse::<Language>()
                .map_err(|err| {
                    warn!("Invalid {ENV_LANG} value: {err}");
                    err
                })
                .with_context(|| format!("{ENV_LANG}={raw}"))?,
            None => {
                info!("{ENV_LANG} not set, using default: {DEFAULT_LANGUAGE}");
                DEFAULT_LANGUAGE
            }
        };

        let currency = var(ENV_CURRENCY).unwrap_or_else(|| {
            info!("{ENV_CURRENCY} not set, using default: {DEFAULT_CURRENCY}");
            DEFAULT_CURRENCY.to_string()
        });

        Ok(Self {
            catalog_path,
            translations_path,
            language,
            currency,
        })
    }

    /// Catalog to load, falling back to the copy shipped in the repository.
    pub fn catalog_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.catalog_path {
            return Ok(path.clone());
        }
        let root = find_repo_root()
            .with_context(|| format!("{ENV_CATALOG} not set and no repository root found"))?;
        let path = default_catalog_path(&root);
        info!("{ENV_CATALOG} not set, using default: {}", path.display());
        Ok(path)
    }

    /// Build the translation table this configuration points at.
    pub fn translation_table(&self) -> Result<TranslationTable> {
        match &self.translations_path {
            Some(path) => TranslationTable::load(path),
            None => Ok(TranslationTable::builtin()),
        }
    }

    pub fn label_resolver(&self) -> Result<LabelResolver> {
        Ok(LabelResolver::new(Arc::new(self.translation_table()?)))
    }

    pub fn listing_renderer(&self) -> Result<ListingRenderer> {
        Ok(ListingRenderer::new(
            self.label_resolver()?,
            self.language,
            self.currency.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn explicit_values_are_used() {
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_CATALOG, "/tmp/catalog.json"),
            (ENV_TRANSLATIONS, "/tmp/translations.json"),
            (ENV_LANG, "KO"),
            (ENV_CURRENCY, "₩"),
        ]))
        .unwrap();
        assert_eq!(config.catalog_path().unwrap(), PathBuf::from("/tmp/catalog.json"));
        assert_eq!(
            config.translations_path,
            Some(PathBuf::from("/tmp/translations.json"))
        );
        assert_eq!(config.language, Language::Ko);
        assert_eq!(config.currency, "₩");
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[(ENV_LANG, " ")])).unwrap();
        assert_eq!(config.catalog_path, None);
        assert_eq!(config.translations_path, None);
        assert_eq!(config.language, Language::Vi);
        assert_eq!(config.currency, DEFAULT_CURRENCY);
        assert_eq!(
            config.translation_table().unwrap(),
            TranslationTable::builtin()
        );
    }

    #[test]
    fn invalid_language_is_an_error() {
        let err = AppConfig::from_lookup(lookup(&[(ENV_LANG, "fr")])).unwrap_err();
        assert!(format!("{err:#}").contains("fr"));
    }
}
