//! Site Counts SDK
//!
//! Types, traits, and markup helpers for server-rendered blocks.
//! Blocks depend on this crate only; the kernel supplies the concrete
//! content-type, query, and translation services behind the traits.

pub mod block;
pub mod html;
pub mod i18n;
pub mod provider;
pub mod types;

// Re-export serde_json so blocks can accept host attribute maps
#[doc(hidden)]
pub use serde_json;

pub mod prelude {
    pub use crate::block::{BlockContext, BlockMetadata, BlockRender};
    pub use crate::html::{escape_attr, html_escape};
    pub use crate::i18n::{PassThrough, Translator, sprintf};
    pub use crate::provider::{ContentTypeProvider, ProviderError, ProviderResult, QueryProvider};
    pub use crate::types::*;
}
