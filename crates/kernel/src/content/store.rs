//! In-memory content store.
//!
//! Holds content type definitions in registration order and the items
//! of those types. Implements the SDK provider traits so blocks can read
//! from it directly.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use site_counts_sdk::provider::{ContentTypeProvider, ProviderError, ProviderResult, QueryProvider};
use site_counts_sdk::types::{ItemId, QueryCriteria, QueryResultItem, StatusCounts, TypeLabels};
use tracing::debug;

use super::query;

/// A registered content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTypeDef {
    /// Machine name (e.g., "post", "page").
    pub slug: String,
    pub singular: String,
    pub plural: String,
    /// Whether the type is listed among public types.
    #[serde(default = "default_true")]
    pub public: bool,
}

fn default_true() -> bool {
    true
}

impl ContentTypeDef {
    pub fn new(slug: &str, singular: &str, plural: &str) -> Self {
        Self {
            slug: slug.into(),
            singular: singular.into(),
            plural: plural.into(),
            public: true,
        }
    }

    /// Mark the type as internal.
    pub fn private(mut self) -> Self {
        self.public = false;
        self
    }

    pub fn labels(&self) -> TypeLabels {
        TypeLabels::new(&self.singular, &self.plural)
    }
}

/// A stored content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredItem {
    pub id: ItemId,
    pub item_type: String,
    pub title: String,
    pub status: String,
    /// Tag slugs.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Category slugs.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Local creation time.
    pub created: NaiveDateTime,
}

/// In-memory content types and items.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    types: Vec<ContentTypeDef>,
    items: Vec<StoredItem>,
}

impl ContentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with the built-in types: posts, pages, media, and
    /// the internal revision type.
    pub fn with_builtin_types() -> Self {
        let mut store = Self::new();
        store.register_type(ContentTypeDef::new("post", "Post", "Posts"));
        store.register_type(ContentTypeDef::new("page", "Page", "Pages"));
        store.register_type(ContentTypeDef::new("attachment", "Media", "Media"));
        store.register_type(ContentTypeDef::new("revision", "Revision", "Revisions").private());
        store
    }

    /// Register a content type. Re-registering a slug replaces its
    /// definition but keeps its original position.
    pub fn register_type(&mut self, def: ContentTypeDef) {
        match self.types.iter_mut().find(|t| t.slug == def.slug) {
            Some(existing) => *existing = def,
            None => self.types.push(def),
        }
    }

    /// Look up a content type by slug.
    pub fn type_def(&self, slug: &str) -> Option<&ContentTypeDef> {
        self.types.iter().find(|t| t.slug == slug)
    }

    /// All content types, in registration order.
    pub fn types(&self) -> &[ContentTypeDef] {
        &self.types
    }

    /// Add an item.
    pub fn insert_item(&mut self, item: StoredItem) {
        self.items.push(item);
    }

    /// All items, in insertion order.
    pub fn items(&self) -> &[StoredItem] {
        &self.items
    }

    /// Look up an item by id.
    pub fn item(&self, id: ItemId) -> Option<&StoredItem> {
        self.items.iter().find(|i| i.id == id)
    }

    fn require_type(&self, slug: &str) -> ProviderResult<&ContentTypeDef> {
        self.type_def(slug)
            .ok_or_else(|| ProviderError::UnknownType(slug.to_string()))
    }
}

impl ContentTypeProvider for ContentStore {
    fn list_public_types(&self) -> ProviderResult<Vec<String>> {
        Ok(self
            .types
            .iter()
            .filter(|t| t.public)
            .map(|t| t.slug.clone())
            .collect())
    }

    fn count_by_status(&self, slug: &str) -> ProviderResult<StatusCounts> {
        self.require_type(slug)?;
        let mut counts = StatusCounts::new();
        for item in self.items.iter().filter(|i| i.item_type == slug) {
            counts.increment(&item.status);
        }
        Ok(counts)
    }

    fn labels(&self, slug: &str) -> ProviderResult<TypeLabels> {
        self.require_type(slug).map(ContentTypeDef::labels)
    }
}

impl QueryProvider for ContentStore {
    fn query(&self, criteria: &QueryCriteria) -> ProviderResult<Vec<QueryResultItem>> {
        let results = query::run(&self.items, criteria)?;
        debug!(
            types = ?criteria.item_types,
            matched = results.len(),
            "content query"
        );
        Ok(results)
    }
}
