//! Block registry - maps block names to their renderers.

use std::collections::HashMap;

use serde_json::Value;
use site_counts_sdk::block::{BlockContext, BlockMetadata, BlockRender};
use site_counts_sdk::types::RenderAttributes;
use tracing::{debug, info};

use crate::error::{KernelError, KernelResult};

/// Registry of server-rendered blocks, keyed by block name.
#[derive(Default)]
pub struct BlockRegistry {
    blocks: HashMap<String, Box<dyn BlockRender>>,
}

impl BlockRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a block under `metadata().name`.
    ///
    /// A name can only be registered once.
    pub fn register(&mut self, block: impl BlockRender + 'static) -> KernelResult<()> {
        let meta = block.metadata();
        if self.blocks.contains_key(&meta.name) {
            return Err(KernelError::DuplicateBlock(meta.name));
        }

        info!(
            block = %meta.name,
            title = %meta.title,
            category = %meta.category,
            "registered block"
        );
        self.blocks.insert(meta.name, Box::new(block));
        Ok(())
    }

    /// Look up a block by name.
    pub fn get(&self, name: &str) -> Option<&dyn BlockRender> {
        self.blocks.get(name).map(|b| b.as_ref())
    }

    /// Check whether a block is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.blocks.contains_key(name)
    }

    /// Return the number of registered blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Registered block names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.blocks.keys().cloned().collect();
        names.sort();
        names
    }

    /// Metadata of every registered block, sorted by name.
    pub fn metadata(&self) -> Vec<BlockMetadata> {
        let mut all: Vec<BlockMetadata> = self.blocks.values().map(|b| b.metadata()).collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    /// Render a block from the host's raw attribute map.
    ///
    /// Provider failures inside the block surface as
    /// [`KernelError::Provider`] with the original error.
    pub fn render(
        &self,
        name: &str,
        attributes: &Value,
        content: &str,
        ctx: &BlockContext<'_>,
    ) -> KernelResult<String> {
        let block = self
            .get(name)
            .ok_or_else(|| KernelError::UnknownBlock(name.to_string()))?;
        let attributes = RenderAttributes::from_value(attributes);

        debug!(block = %name, current_item = %ctx.current_item, "rendering block");
        Ok(block.render(&attributes, content, ctx)?)
    }
}

impl std::fmt::Debug for BlockRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockRegistry")
            .field("blocks", &self.names())
            .finish()
    }
}
