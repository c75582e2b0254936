//! Locale-aware number formatting.

use site_counts_sdk::i18n::group_thousands;

/// Separators used when formatting numbers for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormat {
    pub thousands_sep: String,
    pub decimal_point: String,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            thousands_sep: ",".into(),
            decimal_point: ".".into(),
        }
    }
}

impl NumberFormat {
    pub fn new(thousands_sep: &str, decimal_point: &str) -> Self {
        Self {
            thousands_sep: thousands_sep.into(),
            decimal_point: decimal_point.into(),
        }
    }

    /// Format an integer with thousands separators.
    pub fn format_int(&self, n: u64) -> String {
        group_thousands(n, &self.thousands_sep)
    }
}
