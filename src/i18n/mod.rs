//! Localized category labels.
//!
//! Translation tables are explicit values handed to a `LabelResolver`; there is
//! no global dictionary. Lookups normalize the key once through
//! `normalize_category_key` and fall back to the caller's key when no label is
//! present.

pub mod language;
pub mod resolver;
pub mod table;

pub use language::Language;
pub use resolver::{LabelResolver, resolve_label};
pub use table::{TRANSLATIONS_SCHEMA_VERSION, TranslationTable, TranslationTableBuilder};
