//! YAML content fixtures.
//!
//! A fixture lists content types and items:
//!
//! ```yaml
//! types:
//!   - slug: post
//!     singular: Post
//!     plural: Posts
//! items:
//!   - id: 1
//!     item_type: post
//!     title: Hello
//!     status: publish
//!     tags: [foo]
//!     categories: [baz]
//!     created: 2024-05-01T10:30:00
//! ```
//!
//! Types listed in the fixture are registered after the built-in ones,
//! replacing any built-in type with the same slug.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::store::{ContentStore, ContentTypeDef, StoredItem};
use crate::error::{KernelError, KernelResult};

/// Parsed fixture file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub types: Vec<ContentTypeDef>,
    #[serde(default)]
    pub items: Vec<StoredItem>,
}

impl Fixture {
    /// Parse fixture YAML.
    pub fn from_yaml(content: &str) -> KernelResult<Self> {
        Ok(serde_yml::from_str(content)?)
    }

    /// Build a store from the built-in types plus this fixture.
    ///
    /// Fails if an item references an unregistered type or reuses an id.
    pub fn into_store(self) -> KernelResult<ContentStore> {
        let mut store = ContentStore::with_builtin_types();
        for def in self.types {
            store.register_type(def);
        }

        let mut seen = HashSet::new();
        for item in self.items {
            if store.type_def(&item.item_type).is_none() {
                return Err(KernelError::Fixture(format!(
                    "item {} has unknown type '{}'",
                    item.id, item.item_type
                )));
            }
            if !seen.insert(item.id) {
                return Err(KernelError::Fixture(format!("duplicate item id {}", item.id)));
            }
            store.insert_item(item);
        }
        Ok(store)
    }
}

impl ContentStore {
    /// Load a store from a fixture file.
    pub fn load_fixture(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read fixture {}", path.display()))?;
        let store = Fixture::from_yaml(&content)
            .and_then(Fixture::into_store)
            .with_context(|| format!("failed to load fixture {}", path.display()))?;

        info!(
            path = %path.display(),
            types = store.types().len(),
            items = store.items().len(),
            "content fixture loaded"
        );
        Ok(store)
    }
}
