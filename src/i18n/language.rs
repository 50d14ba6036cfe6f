use anyhow::{Error, Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display languages the shop ships labels for.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Vi,
    Ko,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Vi, Language::Ko];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Vi => "vi",
            Language::Ko => "ko",
        }
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "vi" => Ok(Language::Vi),
            "ko" => Ok(Language::Ko),
            other => bail!("unsupported language '{other}' (expected en|vi|ko)"),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!("VI".parse::<Language>().unwrap(), Language::Vi);
        assert_eq!(" ko ".parse::<Language>().unwrap(), Language::Ko);
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_codes() {
        assert_eq!(serde_json::to_string(&Language::En).unwrap(), "\"en\"");
        let parsed: Language = serde_json::from_str("\"ko\"").unwrap();
        assert_eq!(parsed, Language::Ko);
    }
}
