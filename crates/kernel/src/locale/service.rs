//! Locale service for interface string translation.
//!
//! Loads .po catalogs into an in-memory cache and serves translations,
//! plural selection, and number formatting for the active language
//! through the SDK [`Translator`] trait.

use std::path::Path;

use anyhow::Context;
use dashmap::DashMap;
use site_counts_sdk::i18n::Translator;
use tracing::{info, warn};

use super::number::NumberFormat;
use super::plural::PluralForms;
use super::po_parser::parse_po;

/// Domain holding the number separators, as in core catalogs.
pub const DEFAULT_DOMAIN: &str = "default";

/// Locale translation service.
pub struct LocaleService {
    language: String,
    /// Translation cache: key = "language\0domain\0context\0source" → forms.
    cache: DashMap<String, Vec<String>>,
    /// Plural rule per language.
    plural_forms: DashMap<String, PluralForms>,
}

impl LocaleService {
    /// Create a service for `language` with no catalogs loaded.
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
            cache: DashMap::new(),
            plural_forms: DashMap::new(),
        }
    }

    /// The active language.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Load a .po catalog for the active language into `domain`.
    ///
    /// Returns the number of entries loaded. A `Plural-Forms` header that
    /// fails to parse is logged and the previous rule kept.
    pub fn load_po(&self, domain: &str, content: &str) -> usize {
        let catalog = parse_po(content);

        if let Some(header) = &catalog.plural_forms {
            match PluralForms::parse(header) {
                Ok(rule) => self.set_plural_forms(rule),
                Err(e) => warn!(
                    language = %self.language,
                    domain = %domain,
                    error = %e,
                    "ignoring invalid Plural-Forms header"
                ),
            }
        }

        let count = catalog.entries.len();
        for entry in catalog.entries {
            self.insert(domain, &entry.context, &entry.source, entry.translations);
        }

        info!(
            language = %self.language,
            domain = %domain,
            count = count,
            "loaded locale translations"
        );
        count
    }

    /// Load a .po file for the active language into `domain`.
    pub fn load_po_file(&self, domain: &str, path: &Path) -> anyhow::Result<usize> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read translations {}", path.display()))?;
        Ok(self.load_po(domain, &content))
    }

    /// Insert a translation for the active language.
    ///
    /// `translations` holds one string per plural form; single-form
    /// messages carry one.
    pub fn insert(&self, domain: &str, context: &str, source: &str, translations: Vec<String>) {
        let key = cache_key(&self.language, domain, context, source);
        self.cache.insert(key, translations);
    }

    /// Replace the plural rule of the active language.
    pub fn set_plural_forms(&self, rule: PluralForms) {
        self.plural_forms.insert(self.language.clone(), rule);
    }

    /// Plural rule of the active language (source-language rule if unset).
    pub fn plural_forms(&self) -> PluralForms {
        self.plural_forms
            .get(&self.language)
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Separators for the active language, from the default domain.
    pub fn number_format(&self) -> NumberFormat {
        let thousands_sep = self.translate(",", "thousands separator", DEFAULT_DOMAIN);
        let decimal_point = self.translate(".", "decimal point", DEFAULT_DOMAIN);
        NumberFormat::new(&thousands_sep, &decimal_point)
    }

    /// Find the translation forms for a message.
    ///
    /// Falls back to the context-free entry when no contextual one exists.
    fn lookup(&self, domain: &str, context: &str, source: &str) -> Option<Vec<String>> {
        let key = cache_key(&self.language, domain, context, source);
        if let Some(forms) = self.cache.get(&key) {
            return Some(forms.clone());
        }

        // Try without context
        if !context.is_empty() {
            let key = cache_key(&self.language, domain, "", source);
            if let Some(forms) = self.cache.get(&key) {
                return Some(forms.clone());
            }
        }
        None
    }

    /// Number of cached messages.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Check if no messages are cached.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Clear the translation cache.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

impl Translator for LocaleService {
    /// Translate a source string. Falls back to the source string if no
    /// translation is found.
    fn translate(&self, text: &str, context: &str, domain: &str) -> String {
        self.lookup(domain, context, text)
            .and_then(|forms| forms.into_iter().next())
            .unwrap_or_else(|| text.to_string())
    }

    /// Untranslated messages select between the two source strings by the
    /// source-language rule.
    fn translate_plural(
        &self,
        single: &str,
        plural: &str,
        n: u64,
        context: &str,
        domain: &str,
    ) -> String {
        if let Some(forms) = self.lookup(domain, context, single)
            && !forms.is_empty()
        {
            let index = self.plural_forms().index(n).min(forms.len() - 1);
            return forms[index].clone();
        }

        if PluralForms::default().index(n) == 0 {
            single.to_string()
        } else {
            plural.to_string()
        }
    }

    fn format_number(&self, n: u64) -> String {
        self.number_format().format_int(n)
    }
}

/// Build a cache key from language, domain, context, and source.
///
/// Uses null byte separator (`\0`) to prevent collisions when any part
/// contains the separator character of a printable scheme.
fn cache_key(language: &str, domain: &str, context: &str, source: &str) -> String {
    format!("{language}\0{domain}\0{context}\0{source}")
}

impl std::fmt::Debug for LocaleService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleService")
            .field("language", &self.language)
            .field("cache_size", &self.cache.len())
            .finish()
    }
}
