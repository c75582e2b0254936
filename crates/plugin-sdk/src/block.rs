//! Server-rendered block API.
//!
//! A block is registered with the host under a unique name and invoked
//! with the parsed attributes, the raw saved content, and a
//! [`BlockContext`] exposing the current item and the host services.

use serde::{Deserialize, Serialize};

use crate::i18n::Translator;
use crate::provider::{ContentTypeProvider, ProviderResult, QueryProvider};
use crate::types::{ItemId, RenderAttributes};

/// Registration metadata for a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockMetadata {
    /// Namespaced block name (e.g. "xwp/site-counts").
    pub name: String,
    /// Human-readable title.
    pub title: String,
    /// Inserter category.
    pub category: String,
    /// Translation domain for the block's static copy.
    pub text_domain: String,
}

/// Host handle passed to a block on each render.
#[derive(Clone, Copy)]
pub struct BlockContext<'a> {
    /// The item the block is being rendered inside.
    pub current_item: ItemId,
    pub types: &'a dyn ContentTypeProvider,
    pub query: &'a dyn QueryProvider,
    pub translator: &'a dyn Translator,
}

impl std::fmt::Debug for BlockContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockContext")
            .field("current_item", &self.current_item)
            .finish_non_exhaustive()
    }
}

/// A server-rendered block.
pub trait BlockRender: Send + Sync {
    /// Registration metadata. `metadata().name` is the registry key.
    fn metadata(&self) -> BlockMetadata;

    /// Render the block to an HTML fragment.
    ///
    /// `content` is the saved inner markup of the block; dynamic blocks
    /// may ignore it.
    fn render(
        &self,
        attributes: &RenderAttributes,
        content: &str,
        ctx: &BlockContext<'_>,
    ) -> ProviderResult<String>;
}
