use crate::catalog::CategoryKey;
use crate::i18n::{Language, TranslationTable};
use std::sync::Arc;
use tracing::debug;

/// Localized label for `key`, or `key` itself when no translation exists.
///
/// The fallback returns the caller's spelling untouched, not the normalized
/// form used for the lookup.
pub fn resolve_label<'a>(key: &'a str, language: Language, table: &'a TranslationTable) -> &'a str {
    match table.label(key, language) {
        Some(label) => label,
        None => {
            debug!(key, language = %language, "no category translation, using key");
            key
        }
    }
}

#[derive(Clone, Debug)]
/// Resolves category labels against a table supplied at construction.
pub struct LabelResolver {
    table: Arc<TranslationTable>,
}

impl LabelResolver {
    pub fn new(table: impl Into<Arc<TranslationTable>>) -> Self {
        Self {
            table: table.into(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(TranslationTable::builtin())
    }

    pub fn table(&self) -> &TranslationTable {
        &self.table
    }

    pub fn resolve<'a>(&'a self, key: &'a str, language: Language) -> &'a str {
        resolve_label(key, language, &self.table)
    }

    /// Labels for every key, in the order given.
    pub fn resolve_all(&self, keys: &[CategoryKey], language: Language) -> Vec<String> {
        keys.iter()
            .map(|key| self.resolve(key.raw(), language).to_string())
            .collect()
    }
}
