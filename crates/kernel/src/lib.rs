//! Site Counts Kernel Library
//!
//! Host-side services for server-rendered blocks: the block registry,
//! an in-memory content store that answers content-type and query
//! requests, and locale services for translation and number formatting.
//! The `site-counts` binary wires these together.

pub mod block;
pub mod config;
pub mod content;
pub mod error;
pub mod locale;

pub use block::BlockRegistry;
pub use config::{Config, ConfigOverrides};
pub use content::{ContentStore, ContentTypeDef, StoredItem};
pub use error::{KernelError, KernelResult};
pub use locale::{LocaleService, NumberFormat, PluralForms};
