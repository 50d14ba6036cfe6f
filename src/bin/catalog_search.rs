//! Searches the plant catalog and streams matching rows as NDJSON.
//!
//! Loads the catalog (`--catalog`, `PLANTSTORE_CATALOG`, or the repository
//! copy; `-` reads items from stdin), applies the name query and any category
//! filters, and prints one display row per match. `--raw` prints the
//! catalog items themselves instead of display rows.

use anyhow::{Context, Result, anyhow, bail};
use plantstore::config::{ENV_CATALOG, ENV_LANG, ENV_TRANSLATIONS};
use plantstore::listing::no_results_message;
use plantstore::telemetry::init_tracing;
use plantstore::{
    AppConfig, CatalogIndex, CategoryKey, SearchQuery, parse_catalog_stream, split_list,
};
use std::env;
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::debug;

const STDIN_MARKER: &str = "-";

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse()?;
    let config = AppConfig::from_lookup(|key| cli.env_override(key).or_else(|| env::var(key).ok()))?;
    let index = load_index(&config)?;

    let query = SearchQuery {
        text: cli.query.clone().unwrap_or_default(),
        categories: cli.categories.iter().map(|key| CategoryKey::from(key.as_str())).collect(),
    };
    let matches = query.apply(index.items());
    debug!(matched = matches.len(), total = index.len(), "search finished");

    if matches.is_empty() {
        eprintln!("catalog-search: {}", no_results_message(config.language));
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.raw {
        for item in matches {
            writeln!(out, "{}", serde_json::to_string(item)?)?;
        }
    } else {
        let renderer = config.listing_renderer()?;
        for listing in renderer.render_all(matches) {
            writeln!(out, "{}", serde_json::to_string(&listing)?)?;
        }
    }
    Ok(())
}

fn load_index(config: &AppConfig) -> Result<CatalogIndex> {
    let path = config.catalog_path()?;
    if path == Path::new(STDIN_MARKER) {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("reading catalog items from stdin")?;
        return CatalogIndex::from_items(parse_catalog_stream(&input)?);
    }
    CatalogIndex::load(&path)
}

struct Cli {
    catalog: Option<String>,
    translations: Option<String>,
    lang: Option<String>,
    query: Option<String>,
    categories: Vec<String>,
    raw: bool,
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut args = env::args_os();
        let _program = args.next();
        let mut cli = Cli {
            catalog: None,
            translations: None,
            lang: None,
            query: None,
            categories: Vec::new(),
            raw: false,
        };

        while let Some(arg) = args.next() {
            let arg_str = arg
                .to_str()
                .ok_or_else(|| anyhow!("invalid UTF-8 in argument"))?;
            match arg_str {
                "--catalog" => cli.catalog = Some(next_value("--catalog", &mut args)?),
                "--translations" => {
                    cli.translations = Some(next_value("--translations", &mut args)?)
                }
                "--lang" => cli.lang = Some(next_value("--lang", &mut args)?),
                "--query" | "-q" => cli.query = Some(next_value("--query", &mut args)?),
                "--category" => cli
                    .categories
                    .extend(split_list(&next_value("--category", &mut args)?)),
                "--raw" => cli.raw = true,
                "--help" | "-h" => usage(0),
                other => bail!("unknown argument: {other}"),
            }
        }

        Ok(cli)
    }

    /// Flags take precedence over the matching environment variables.
    fn env_override(&self, key: &str) -> Option<String> {
        match key {
            ENV_CATALOG => self.catalog.clone(),
            ENV_TRANSLATIONS => self.translations.clone(),
            ENV_LANG => self.lang.clone(),
            _ => None,
        }
    }
}

fn next_value(flag: &str, args: &mut env::ArgsOs) -> Result<String> {
    let value = args
        .next()
        .ok_or_else(|| anyhow!("{flag} requires a value"))?
        .into_string()
        .map_err(|_| anyhow!("{flag} must be valid UTF-8"))?;
    if value.trim().is_empty() && flag != "--query" {
        bail!("{flag} must not be empty");
    }
    Ok(value)
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: catalog-search [--catalog PATH|-] [--query TEXT] [--category KEY[,KEY...]] [--lang en|vi|ko] [--translations PATH] [--raw]\n\nOptions:\n  --catalog PATH            Catalog file, or '-' for items on stdin (or set PLANTSTORE_CATALOG).\n  --query TEXT              Case-insensitive substring of the display name; empty matches all.\n  --category KEYS           Keep only items tagged with every listed key (e.g. indoor,small); repeatable.\n  --lang LANG               Display language for prices and labels (or set PLANTSTORE_LANG).\n  --translations PATH       Category translation file (or set PLANTSTORE_TRANSLATIONS).\n  --raw                     Print catalog items instead of display rows.\n  --help                    Show this help text."
    );
    std::process::exit(code);
}
