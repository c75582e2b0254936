//! Gettext .po file parser.
//!
//! Parses .po catalogs into entries with context, singular and plural
//! source strings, and one translation per plural form. The header entry
//! (`msgid ""`) is read for its `Plural-Forms` line instead of being
//! returned as an entry.

/// A parsed .po entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoEntry {
    pub context: String,
    pub source: String,
    /// `msgid_plural`, for entries with plural forms.
    pub source_plural: Option<String>,
    /// `msgstr`, or `msgstr[0]`, `msgstr[1]`, … in form order.
    pub translations: Vec<String>,
}

/// A parsed .po file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoCatalog {
    /// Value of the `Plural-Forms` header, if present.
    pub plural_forms: Option<String>,
    pub entries: Vec<PoEntry>,
}

/// Highest number of plural forms a catalog entry may carry.
///
/// Real languages use at most six; anything beyond this marks the entry
/// as malformed.
pub const MAX_PLURAL_FORMS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Context,
    Source,
    SourcePlural,
    Translation(usize),
}

#[derive(Debug, Default)]
struct Pending {
    context: String,
    source: String,
    source_plural: Option<String>,
    translations: Vec<String>,
    fuzzy: bool,
    malformed: bool,
    seen_msgid: bool,
}

impl Pending {
    fn translation_mut(&mut self, index: usize) -> &mut String {
        if self.translations.len() <= index {
            self.translations.resize(index + 1, String::new());
        }
        &mut self.translations[index]
    }

    /// Move the pending entry into the catalog, if it is usable.
    fn finish(&mut self, catalog: &mut PoCatalog) {
        let entry = std::mem::take(self);
        if !entry.seen_msgid {
            return;
        }

        if entry.source.is_empty() {
            // Header entry
            let header = entry.translations.first().map(String::as_str).unwrap_or("");
            catalog.plural_forms = header
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(key, _)| key.trim().eq_ignore_ascii_case("Plural-Forms"))
                .map(|(_, value)| value.trim().to_string());
            return;
        }

        let translated =
            !entry.translations.is_empty() && entry.translations.iter().all(|t| !t.is_empty());
        if translated && !entry.fuzzy && !entry.malformed {
            catalog.entries.push(PoEntry {
                context: entry.context,
                source: entry.source,
                source_plural: entry.source_plural,
                translations: entry.translations,
            });
        }
    }
}

/// Parse a .po file contents into a catalog.
///
/// Handles multiline strings, msgctxt, msgid, msgid_plural, msgstr and
/// msgstr[n]. Untranslated and fuzzy entries are skipped, as are entries
/// with a plural index that is not a number below [`MAX_PLURAL_FORMS`].
pub fn parse_po(content: &str) -> PoCatalog {
    let mut catalog = PoCatalog::default();
    let mut pending = Pending::default();
    let mut current_field: Option<Field> = None;

    for line in content.lines() {
        let line = line.trim();

        if let Some(flags) = line.strip_prefix("#,") {
            if flags.split(',').any(|f| f.trim() == "fuzzy") {
                pending.fuzzy = true;
            }
            continue;
        }

        // Skip comments
        if line.starts_with('#') {
            continue;
        }

        // Empty line marks end of entry
        if line.is_empty() {
            pending.finish(&mut catalog);
            current_field = None;
            continue;
        }

        if let Some(rest) = line.strip_prefix("msgctxt ") {
            // A new msgctxt after a complete entry starts the next one.
            if pending.seen_msgid {
                pending.finish(&mut catalog);
            }
            pending.context = unquote(rest);
            current_field = Some(Field::Context);
        } else if let Some(rest) = line.strip_prefix("msgid_plural ") {
            pending.source_plural = Some(unquote(rest));
            current_field = Some(Field::SourcePlural);
        } else if let Some(rest) = line.strip_prefix("msgid ") {
            if pending.seen_msgid {
                pending.finish(&mut catalog);
            }
            pending.source = unquote(rest);
            pending.seen_msgid = true;
            current_field = Some(Field::Source);
        } else if let Some(rest) = line.strip_prefix("msgstr[") {
            let Some((index, value)) = rest.split_once(']') else {
                continue;
            };
            let index = match index.trim().parse::<usize>() {
                Ok(index) if index < MAX_PLURAL_FORMS => index,
                _ => {
                    pending.malformed = true;
                    current_field = None;
                    continue;
                }
            };
            *pending.translation_mut(index) = unquote(value);
            current_field = Some(Field::Translation(index));
        } else if let Some(rest) = line.strip_prefix("msgstr ") {
            *pending.translation_mut(0) = unquote(rest);
            current_field = Some(Field::Translation(0));
        } else if line.starts_with('"') {
            // Continuation line
            let continued = unquote(line);
            match current_field {
                Some(Field::Context) => pending.context.push_str(&continued),
                Some(Field::Source) => pending.source.push_str(&continued),
                Some(Field::SourcePlural) => {
                    if let Some(plural) = pending.source_plural.as_mut() {
                        plural.push_str(&continued);
                    }
                }
                Some(Field::Translation(i)) => pending.translation_mut(i).push_str(&continued),
                None => {}
            }
        }
    }

    // Handle last entry (file may not end with empty line)
    pending.finish(&mut catalog);

    catalog
}

/// Remove surrounding quotes and unescape basic sequences.
///
/// Uses a single-pass character-by-character parser to avoid ordering bugs
/// where chained `.replace()` calls could double-unescape sequences like `\\n`.
fn unquote(s: &str) -> String {
    let s = s.trim();
    let s = s.strip_prefix('"').unwrap_or(s);
    let s = s.strip_suffix('"').unwrap_or(s);

    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                Some('"') => result.push('"'),
                Some('\\') => result.push('\\'),
                Some(other) => {
                    result.push('\\');
                    result.push(other);
                }
                None => result.push('\\'),
            }
        } else {
            result.push(c);
        }
    }
    result
}
