//! Prints the localized label for each category key.
//!
//! Keys may be passed as separate arguments or comma-separated. Keys without a
//! translation are printed unchanged.

use anyhow::{Result, anyhow, bail};
use plantstore::config::{ENV_LANG, ENV_TRANSLATIONS};
use plantstore::telemetry::init_tracing;
use plantstore::{AppConfig, split_list};
use std::env;
use std::io::{self, Write};

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse()?;
    if cli.keys.is_empty() {
        usage(1);
    }

    let config = AppConfig::from_lookup(|key| match key {
        ENV_LANG => cli.lang.clone().or_else(|| env::var(key).ok()),
        ENV_TRANSLATIONS => cli.translations.clone().or_else(|| env::var(key).ok()),
        _ => env::var(key).ok(),
    })?;
    let resolver = config.label_resolver()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for key in &cli.keys {
        writeln!(out, "{}", resolver.resolve(key, config.language))?;
    }
    Ok(())
}

struct Cli {
    lang: Option<String>,
    translations: Option<String>,
    keys: Vec<String>,
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut args = env::args_os();
        let _program = args.next();
        let mut lang = None;
        let mut translations = None;
        let mut keys = Vec::new();

        while let Some(arg) = args.next() {
            let arg_str = arg
                .to_str()
                .ok_or_else(|| anyhow!("invalid UTF-8 in argument"))?;
            match arg_str {
                "--lang" => lang = Some(next_value("--lang", &mut args)?),
                "--translations" => translations = Some(next_value("--translations", &mut args)?),
                "--help" | "-h" => usage(0),
                other if other.starts_with("--") => bail!("unknown argument: {other}"),
                other => keys.extend(split_list(other)),
            }
        }

        Ok(Self {
            lang,
            translations,
            keys,
        })
    }
}

fn next_value(flag: &str, args: &mut env::ArgsOs) -> Result<String> {
    let value = args
        .next()
        .ok_or_else(|| anyhow!("{flag} requires a value"))?
        .into_string()
        .map_err(|_| anyhow!("{flag} must be valid UTF-8"))?;
    if value.trim().is_empty() {
        bail!("{flag} must not be empty");
    }
    Ok(value)
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: category-label [--lang en|vi|ko] [--translations PATH] KEY...\n\nOptions:\n  --lang LANG               Label language (or set PLANTSTORE_LANG; default vi).\n  --translations PATH       Category translation file (or set PLANTSTORE_TRANSLATIONS).\n  --help                    Show this help text."
    );
    std::process::exit(code);
}
