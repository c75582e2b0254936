//! Locale services: .po catalogs, plural rules, and number formatting.

mod number;
mod plural;
mod po_parser;
mod service;

pub use number::NumberFormat;
pub use plural::PluralForms;
pub use po_parser::{PoCatalog, PoEntry, parse_po};
pub use service::{DEFAULT_DOMAIN, LocaleService};
