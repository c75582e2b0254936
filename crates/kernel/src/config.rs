//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, bail};

/// Default interface language.
pub const DEFAULT_LOCALE: &str = "en_US";

/// Host configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Interface language (default: en_US).
    pub locale: String,

    /// YAML content fixture. When None, only the built-in types exist.
    pub fixture: Option<PathBuf>,

    /// .po catalog for the block's text domain.
    pub translations: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            fixture: None,
            translations: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through a variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let locale = var("SITE_COUNTS_LOCALE").unwrap_or_else(|| DEFAULT_LOCALE.to_string());
        if locale.chars().any(char::is_whitespace) {
            bail!("SITE_COUNTS_LOCALE must not contain whitespace");
        }

        let fixture = var("SITE_COUNTS_FIXTURE").map(PathBuf::from);
        let translations = var("SITE_COUNTS_TRANSLATIONS").map(PathBuf::from);

        Ok(Self {
            locale,
            fixture,
            translations,
        })
    }

    /// Apply command-line values over the loaded configuration.
    ///
    /// Each `Some` replaces the corresponding setting; `None` keeps it.
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(locale) = overrides.locale {
            self.locale = locale;
        }
        if let Some(fixture) = overrides.fixture {
            self.fixture = Some(fixture);
        }
        if let Some(translations) = overrides.translations {
            self.translations = Some(translations);
        }
    }
}

/// Settings given on the command line, taking precedence over env.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub locale: Option<String>,
    pub fixture: Option<PathBuf>,
    pub translations: Option<PathBuf>,
}
