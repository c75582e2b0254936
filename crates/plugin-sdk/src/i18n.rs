//! Translation and number formatting seam.
//!
//! Blocks pass every piece of static copy through a [`Translator`] with a
//! message context and text domain. The kernel's locale service is the
//! real implementation; [`PassThrough`] returns source strings unchanged.

/// Locale-aware translation and number formatting.
pub trait Translator {
    /// Translate a source string. Empty `context` means none.
    fn translate(&self, text: &str, context: &str, domain: &str) -> String;

    /// Translate a string with singular and plural source forms, choosing
    /// the form for `n` by the locale's plural rule.
    fn translate_plural(
        &self,
        single: &str,
        plural: &str,
        n: u64,
        context: &str,
        domain: &str,
    ) -> String;

    /// Format an integer with the locale's thousands separator.
    fn format_number(&self, n: u64) -> String {
        group_thousands(n, ",")
    }
}

/// Returns source strings untouched.
///
/// Plural selection follows the source language (English), as gettext does
/// for untranslated messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl Translator for PassThrough {
    fn translate(&self, text: &str, _context: &str, _domain: &str) -> String {
        text.to_string()
    }

    fn translate_plural(
        &self,
        single: &str,
        plural: &str,
        n: u64,
        _context: &str,
        _domain: &str,
    ) -> String {
        if n == 1 { single } else { plural }.to_string()
    }
}

/// Insert `sep` between every group of three digits.
pub fn group_thousands(n: u64, sep: &str) -> String {
    let digits = n.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * sep.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(sep);
        }
        out.push(ch);
    }
    out
}

/// `printf`-style interpolation of string arguments.
///
/// Supports sequential `%s`/`%d`, positional `%1$s`, and `%%`. Missing
/// arguments interpolate as nothing; unrecognised directives are copied
/// through literally.
pub fn sprintf(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    let mut next_arg = 0;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some('s' | 'd') => {
                chars.next();
                if let Some(arg) = args.get(next_arg) {
                    out.push_str(arg);
                }
                next_arg += 1;
            }
            Some(d) if d.is_ascii_digit() => {
                let mut lookahead = chars.clone();
                let mut digits = String::new();
                while let Some(&d) = lookahead.peek() {
                    if !d.is_ascii_digit() {
                        break;
                    }
                    digits.push(d);
                    lookahead.next();
                }
                let positional = lookahead.next() == Some('$')
                    && matches!(lookahead.peek(), Some('s' | 'd'));
                if positional {
                    lookahead.next();
                    chars = lookahead;
                    let arg = digits
                        .parse::<usize>()
                        .ok()
                        .and_then(|i| i.checked_sub(1))
                        .and_then(|i| args.get(i));
                    if let Some(arg) = arg {
                        out.push_str(arg);
                    }
                } else {
                    out.push('%');
                }
            }
            _ => out.push('%'),
        }
    }
    out
}
